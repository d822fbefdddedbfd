//! Greenhouse LED Inference - Main Entry Point
//!
//! Loads the four model artifacts and runs the reference sensor reading
//! through the predictor as a startup smoke check.

use anyhow::{Context, Result};
use greenhouse_led_inference::{AppConfig, LedPredictor};
use std::collections::HashMap;
use tracing::info;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("greenhouse_led_inference=info".parse()?),
        )
        .init();

    info!("Starting greenhouse LED inference");

    // Load configuration
    let config = AppConfig::load()?;
    info!(
        models_dir = %config.models.models_dir,
        "Configuration loaded successfully"
    );

    // Load artifacts; a missing file is fatal and names itself in the error
    let predictor = LedPredictor::from_config(&config)
        .context("Failed to initialize predictor from artifacts")?;
    info!(
        features = predictor.feature_count(),
        "Predictor ready"
    );

    // Reference reading: a morning sample at 08:30
    let mut reading = HashMap::new();
    reading.insert("Light_Intensity".to_string(), 500.0);
    reading.insert("Temperature".to_string(), 21.5);
    reading.insert("Humidity".to_string(), 67.0);
    reading.insert("Minute_Of_Day".to_string(), 510.0);

    let decision = predictor.predict(&reading)?;
    info!(decision = %decision, "LED decision");

    println!("LED decision: {decision}");

    Ok(())
}
