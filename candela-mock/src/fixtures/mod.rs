pub mod series;
pub mod tokens;
