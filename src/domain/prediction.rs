use std::{error::Error, fmt};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::{customer::CustomerRecord, encoder::FeatureVector};

/// 学習済み分類器
///
/// 22要素の特徴量ベクトルを受け取り、0 または 1 を返す。
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<u8, PredictionError>;
}

/// 顧客満足度
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Satisfaction {
    Satisfied,
    Dissatisfied,
}

impl TryFrom<u8> for Satisfaction {
    type Error = PredictionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Satisfied),
            0 => Ok(Self::Dissatisfied),
            other => Err(PredictionError::UnexpectedOutput(other)),
        }
    }
}

impl fmt::Display for Satisfaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Satisfied => f.write_str("SATISFIED"),
            Self::Dissatisfied => f.write_str("DISSATISFIED"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Prediction {
    pub satisfaction: Satisfaction,
    pub features: FeatureVector,
}

pub struct Predictor {
    model: Box<dyn Classifier>,
}

impl Predictor {
    pub fn new<C: Classifier + 'static>(model: C) -> Self {
        Self {
            model: Box::new(model),
        }
    }

    pub fn predict(&self, record: &CustomerRecord) -> Result<Prediction, PredictionError> {
        let features = record.encode();
        debug!(
            "特徴量ベクトル: {:?}",
            features.named().collect::<Vec<_>>()
        );
        let satisfaction = Satisfaction::try_from(self.model.predict(&features)?)?;
        info!("予測結果: {} ({})", satisfaction, record);
        Ok(Prediction {
            satisfaction,
            features,
        })
    }
}

impl fmt::Debug for Predictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predictor").finish_non_exhaustive()
    }
}

#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("Model error: {0}")]
    Model(Box<dyn Error + Send + Sync>),
    #[error("Model returned unexpected output {0}, expected 0 or 1")]
    UnexpectedOutput(u8),
}
