pub mod criteria;
pub mod track;
