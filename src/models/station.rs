//! Modelo de Station
//!
//! Las estaciones se crean de forma perezosa (merge-on-write) al registrar
//! rutas. El campo `type` es la etiqueta histórica asignada en la primera
//! creación (`origen`/`destino`/`intermedia`); es solo un hint y ninguna
//! lógica depende de él.

use serde::{Deserialize, Serialize};

/// Rol de una estación dentro de una ruta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationRole {
    Origin,
    Destination,
    Stop,
}

impl StationRole {
    /// Etiqueta legada usada como `type` del nodo Station
    pub fn type_label(&self) -> &'static str {
        match self {
            StationRole::Origin => "origen",
            StationRole::Destination => "destino",
            StationRole::Stop => "intermedia",
        }
    }
}

/// Estación tal como la expone el servicio remoto de estaciones
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteStation {
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_labels() {
        assert_eq!(StationRole::Origin.type_label(), "origen");
        assert_eq!(StationRole::Destination.type_label(), "destino");
        assert_eq!(StationRole::Stop.type_label(), "intermedia");
    }
}
