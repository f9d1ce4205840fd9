use std::fmt;
use std::str::FromStr;

use crate::error::NetworkError;

/// Column identifiers of a dataset table.
///
/// The derived ordering puts the features first, in coordinate order, then
/// the true label and finally the predicted label:
/// `x_1 < x_2 < … < y < y_hat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Header {
    /// Feature coordinate, 1-based.
    X(usize),
    Y,
    YHat,
}

impl Header {
    /// `x_1..x_k`.
    pub fn features(dimensions: usize) -> Vec<Header> {
        (1..=dimensions).map(Header::X).collect()
    }

    /// `x_1..x_k, y`: the columns of a raw dataset.
    pub fn initial(dimensions: usize) -> Vec<Header> {
        let mut headers = Header::features(dimensions);
        headers.push(Header::Y);
        headers
    }

    pub fn is_feature(&self) -> bool {
        matches!(self, Header::X(_))
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Header::X(k) => write!(f, "x_{k}"),
            Header::Y => write!(f, "y"),
            Header::YHat => write!(f, "y_hat"),
        }
    }
}

impl FromStr for Header {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "y" => Ok(Header::Y),
            "y_hat" => Ok(Header::YHat),
            other => other.strip_prefix("x_")
                .and_then(|k| k.parse::<usize>().ok())
                .filter(|&k| k >= 1)
                .map(Header::X)
                .ok_or_else(|| NetworkError::UnknownHeader(s.to_owned())),
        }
    }
}
