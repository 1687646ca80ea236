use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Classifier, FeatureVector, PredictionError, FEATURE_COUNT};

use super::ModelError;

/// 決定木の内部ノード
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub feature: usize,
    pub threshold: f64,
    pub left: Box<TreeNode>,
    pub right: Box<TreeNode>,
}

/// 決定木の葉
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Leaf {
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TreeNode {
    Node(Split),
    Leaf(Leaf),
}

impl TreeNode {
    /// `x[feature] <= threshold` なら左、そうでなければ右へ進む
    pub fn evaluate(&self, features: &[f64]) -> Result<f64, ModelError> {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf(leaf) => return Ok(leaf.value),
                TreeNode::Node(split) => {
                    let value = features.get(split.feature).ok_or_else(|| {
                        ModelError::Incompatible(format!(
                            "split on feature {} but only {} features were given",
                            split.feature,
                            features.len()
                        ))
                    })?;
                    node = if *value <= split.threshold {
                        &*split.left
                    } else {
                        &*split.right
                    };
                }
            }
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 0,
            TreeNode::Node(split) => 1 + split.left.depth().max(split.right.depth()),
        }
    }

    fn validate(&self, n_features: usize) -> Result<(), ModelError> {
        match self {
            TreeNode::Leaf(leaf) if !leaf.value.is_finite() => Err(ModelError::Incompatible(
                format!("leaf value {} is not finite", leaf.value),
            )),
            TreeNode::Leaf(_) => Ok(()),
            TreeNode::Node(split) => {
                if split.feature >= n_features {
                    return Err(ModelError::Incompatible(format!(
                        "split on feature {} but the model has {} features",
                        split.feature, n_features
                    )));
                }
                if !split.threshold.is_finite() {
                    return Err(ModelError::Incompatible(format!(
                        "threshold {} is not finite",
                        split.threshold
                    )));
                }
                split.left.validate(n_features)?;
                split.right.validate(n_features)
            }
        }
    }
}

/// 勾配ブースティング分類器（二値分類）
///
/// 学習済みモデルをJSONへ書き出したもの。
/// 決定関数は `init_score + learning_rate * Σ tree(x)` で、
/// シグモイドを通した正例確率が 0.5 を超えたときに 1 を返す。
/// デシリアライズ時にも検証される。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawModel")]
pub struct GradientBoostingModel {
    n_features: usize,
    init_score: f64,
    learning_rate: f64,
    trees: Vec<TreeNode>,
}

/// 検証前のモデル
#[derive(Deserialize)]
struct RawModel {
    n_features: usize,
    init_score: f64,
    learning_rate: f64,
    trees: Vec<TreeNode>,
}

impl TryFrom<RawModel> for GradientBoostingModel {
    type Error = ModelError;

    fn try_from(value: RawModel) -> Result<Self, Self::Error> {
        let model = Self {
            n_features: value.n_features,
            init_score: value.init_score,
            learning_rate: value.learning_rate,
            trees: value.trees,
        };
        model.validate()?;
        Ok(model)
    }
}

impl GradientBoostingModel {
    pub fn new(
        init_score: f64,
        learning_rate: f64,
        trees: Vec<TreeNode>,
    ) -> Result<Self, ModelError> {
        let model = Self {
            n_features: FEATURE_COUNT,
            init_score,
            learning_rate,
            trees,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let model = Self::from_json(&json)?;
        info!(
            "モデルを読み込みました: {} (木の数: {}, 最大深さ: {})",
            path.display(),
            model.trees.len(),
            model.max_depth()
        );
        Ok(model)
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let raw: RawModel = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    pub fn n_estimators(&self) -> usize {
        self.trees.len()
    }

    pub fn max_depth(&self) -> usize {
        self.trees.iter().map(TreeNode::depth).max().unwrap_or(0)
    }

    pub fn decision_function(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.evaluate(features.as_slice())?;
        }
        Ok(self.init_score + self.learning_rate * sum)
    }

    /// 正例（満足）の確率
    pub fn predict_proba(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        self.decision_function(features).map(sigmoid)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.n_features != FEATURE_COUNT {
            return Err(ModelError::Incompatible(format!(
                "model expects {} features, application provides {}",
                self.n_features, FEATURE_COUNT
            )));
        }
        if self.trees.is_empty() {
            return Err(ModelError::Incompatible("model has no trees".to_owned()));
        }
        if !self.init_score.is_finite() || !self.learning_rate.is_finite() {
            return Err(ModelError::Incompatible(
                "init_score and learning_rate must be finite".to_owned(),
            ));
        }
        self.trees
            .iter()
            .try_for_each(|tree| tree.validate(self.n_features))
    }
}

impl Classifier for GradientBoostingModel {
    fn predict(&self, features: &FeatureVector) -> Result<u8, PredictionError> {
        Ok(u8::from(self.predict_proba(features)? > 0.5))
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
