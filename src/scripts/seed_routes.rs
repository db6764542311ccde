//! Seeder de rutas
//!
//! Carga seeds/routes.json y crea cada ruta contra la API en ejecución.
//! Uso: `cargo run --bin seed-routes` (API_URL configurable por entorno).

use anyhow::{Context, Result};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<()> {
    let api_url =
        std::env::var("API_URL").unwrap_or_else(|_| "http://localhost:4000".to_string());
    let seeds_path =
        std::env::var("SEEDS_FILE").unwrap_or_else(|_| "seeds/routes.json".to_string());

    let data = std::fs::read_to_string(&seeds_path)
        .with_context(|| format!("No se pudo leer {}", seeds_path))?;
    let routes: Vec<Value> = serde_json::from_str(&data).context("JSON de seeds inválido")?;

    let client = reqwest::Client::new();
    let endpoint = format!("{}/api/routes", api_url.trim_end_matches('/'));

    let mut created = 0usize;
    let mut failed = 0usize;

    for route in &routes {
        let response = client.post(&endpoint).json(route).send().await;

        match response {
            Ok(response) if response.status().is_success() => {
                let body: Value = response.json().await.unwrap_or_default();
                println!("Ruta creada: {}", body["id"].as_str().unwrap_or("?"));
                created += 1;
            }
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                eprintln!("Error creando ruta ({}): {}", status, body);
                failed += 1;
            }
            Err(e) => {
                eprintln!("Error creando ruta: {}", e);
                failed += 1;
            }
        }
    }

    println!("Seeder finalizado: {} creadas, {} fallidas", created, failed);
    Ok(())
}
