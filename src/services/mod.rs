pub mod ergast;
pub mod f1_data;
