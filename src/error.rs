use thiserror::Error;

use crate::data::header::Header;
use crate::network::edge::EdgeId;

/// Every failure the network, its learners and their data collaborators can
/// report. Nothing here is retried: the caller fixes the configuration or data.
#[derive(Debug, Error)]
pub enum NetworkError {
    // -- construction / argument errors ------------------------------------
    #[error("neuron counts ({counts}) must have a length equal to the number of hidden layers ({hidden})")]
    HiddenLayerCountMismatch { counts: usize, hidden: usize },

    #[error("layer {layer} must contain at least one neuron")]
    EmptyLayer { layer: usize },

    #[error("edge must connect adjacent layers (left: {left}, right: {right})")]
    NonAdjacentLayers { left: usize, right: usize },

    #[error("no edge {0} in this network")]
    UnknownEdge(EdgeId),

    #[error("number of features must match the number of neurons in the input layer ({got} != {expected})")]
    InputSizeMismatch { got: usize, expected: usize },

    #[error("number of features must match number of input neurons (features = {features}, input neurons = {inputs})")]
    FeatureCountMismatch { features: usize, inputs: usize },

    #[error("batch size ({batch_size}) cannot be greater than the number of datapoints ({datapoints})")]
    BatchSizeTooLarge { batch_size: usize, datapoints: usize },

    #[error("the number of output neurons ({outputs}) is less than the number of classes in the data ({classes})")]
    TooFewOutputs { outputs: usize, classes: usize },

    #[error("invalid partition: {0}")]
    InvalidPartition(String),

    #[error("number of labels ({labels}) must equal the number of datapoints ({datapoints})")]
    LabelCountMismatch { labels: usize, datapoints: usize },

    #[error("number of bins must be positive")]
    InvalidBinCount,

    #[error("bounds must be finite with lower < upper (lower {lower}, upper {upper}, coordinate {coordinate})")]
    InvalidBounds { coordinate: usize, lower: f64, upper: f64 },

    #[error("mean must be finite ({mean}, coordinate {coordinate})")]
    NonFiniteMean { coordinate: usize, mean: f64 },

    #[error("leak must be positive and finite, got {leak}")]
    InvalidLeak { leak: f64 },

    #[error("standard deviation must be positive and finite (got {std_dev}, coordinate {coordinate})")]
    NonPositiveStdDev { coordinate: usize, std_dev: f64 },

    #[error("invalid proportions: {0}")]
    InvalidProportions(String),

    #[error("column {0} is missing from the dataset")]
    MissingColumn(Header),

    #[error("all columns must have the same length (column {header} has {len}, expected {expected})")]
    RaggedColumns { header: Header, len: usize, expected: usize },

    #[error("value '{value}' in column {header} is not a number")]
    NotNumeric { header: Header, value: String },

    #[error("a regression network has no categories")]
    RegressionHasNoCategories,

    #[error("dataset is empty: {0}")]
    EmptyDataset(String),

    #[error("unknown header '{0}'")]
    UnknownHeader(String),

    // -- numeric domain errors ---------------------------------------------
    #[error("softmax value should be between 0 and 1 (p[{class}] = {value})")]
    ProbabilityOutOfRange { class: usize, value: f64 },

    #[error("class index {class} is outside the output vector of length {len}")]
    ClassOutOfRange { class: usize, len: usize },

    // -- unsupported operations --------------------------------------------
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    // -- collaborator I/O --------------------------------------------------
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NetworkError>;
