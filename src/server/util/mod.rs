pub mod cookie;
pub mod keygen;
pub mod rules;
