
pub mod dice;
pub mod session;
