pub mod domain;
pub mod gradation;
pub mod input;
pub mod numerics;
pub mod report;
