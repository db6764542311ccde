//! Modelo de Route
//!
//! Una ruta tiene exactamente un origen (STARTS_AT), un destino (ENDS_AT)
//! y cero o más paradas intermedias (STOPS_AT). El borrado es lógico:
//! `is_active = false` excluye la ruta de listados y del chequeo de
//! duplicados, pero el nodo permanece en el grafo.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Route principal - refleja el nodo Route expandido con sus estaciones
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    pub origin: String,
    pub destination: String,
    pub stops: Vec<String>,
    pub start_time: String,
    pub end_time: String,
    pub is_active: bool,
}

/// Resultado del borrado lógico: la ruta queda en el grafo con
/// `is_active = false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedRoute {
    pub id: String,
    pub is_active: bool,
}

/// Especificación para crear una nueva ruta. Las estaciones son
/// referencias (nombre local o id remoto) todavía sin resolver.
#[derive(Debug, Clone)]
pub struct NewRoute {
    pub origin: String,
    pub destination: String,
    pub stops: Vec<String>,
    pub start_time: String,
    pub end_time: String,
    pub is_active: bool,
}

/// Especificación de actualización parcial: todo campo omitido conserva
/// el valor actual de la ruta.
#[derive(Debug, Clone, Default)]
pub struct UpdateRoute {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub stops: Option<Vec<String>>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateRoute {
    /// Completa los campos escalares omitidos con los valores actuales.
    /// Las estaciones se resuelven aparte porque los campos provistos son
    /// referencias sin resolver y los actuales ya son nombres canónicos.
    pub fn merged_schedule(&self, current: &Route) -> (String, String, bool) {
        (
            self.start_time
                .clone()
                .unwrap_or_else(|| current.start_time.clone()),
            self.end_time
                .clone()
                .unwrap_or_else(|| current.end_time.clone()),
            self.is_active.unwrap_or(current.is_active),
        )
    }
}

/// Igualdad de conjuntos de paradas, insensible al orden y a repeticiones
pub fn same_stop_set(a: &[String], b: &[String]) -> bool {
    let a: BTreeSet<&str> = a.iter().map(String::as_str).collect();
    let b: BTreeSet<&str> = b.iter().map(String::as_str).collect();
    a == b
}
