pub mod operator;

pub use operator::{scar_operator, scar_rows, mean_scar, SCAR_SCALE};
