//! Utilidades de horarios
//!
//! Validación del formato de hora HH:mm (24 horas) usado por las rutas.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TIME_RE: Regex = Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").unwrap();
}

/// Verifica si el formato de hora es válido (HH:mm, 24 horas)
pub fn is_valid_time(time: &str) -> bool {
    TIME_RE.is_match(time)
}
