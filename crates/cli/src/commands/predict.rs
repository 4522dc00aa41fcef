//! Predict CLI command.
//!
//! Assembles a canonical feature vector from the arguments and asks the
//! failure model for a probability.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use post_trade_predictor::{
    FailurePredictor, FeatureVector, LogisticModel, PredictionInputs, RiskLevel,
};
use rust_decimal::Decimal;

/// Arguments for the predict command.
#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    /// Path to the model artifact (JSON coefficients)
    #[arg(long, default_value = "config/failure_model.json")]
    pub model: PathBuf,

    /// Share count (positive; use --sell for sell orders)
    #[arg(long)]
    pub quantity: Decimal,

    /// Unit price
    #[arg(long)]
    pub price: Decimal,

    /// Hour of day the trade executes, 0-23
    #[arg(long)]
    pub trade_hour: u32,

    /// Day of week, 0 = Monday .. 6 = Sunday
    #[arg(long, default_value_t = 0)]
    pub day_of_week: u32,

    /// Trade is executed on margin
    #[arg(long)]
    pub margin: bool,

    /// Trade is a sell order
    #[arg(long)]
    pub sell: bool,
}

/// Runs the predict command.
///
/// # Errors
/// Returns an error if the model artifact cannot be loaded, the feature
/// vector fails validation, or the model misbehaves.
pub fn run_predict(args: &PredictArgs) -> Result<()> {
    if args.quantity <= Decimal::ZERO {
        bail!("--quantity must be positive; use --sell to mark sell orders");
    }

    let model = LogisticModel::from_json_file(&args.model)?;

    let features = FeatureVector::from_inputs(&PredictionInputs {
        quantity: args.quantity,
        price: args.price,
        trade_hour: args.trade_hour,
        trade_day_of_week: args.day_of_week,
        is_margin_trade: args.margin,
        is_sell_order: args.sell,
    });

    let probability = model.predict_probability(&features)?;
    let level = RiskLevel::from_probability(probability);

    println!("Failure probability: {probability:.4}");
    println!("Risk level:          {}", level.as_str());

    Ok(())
}
