// Draft pick domain: canonical labels, slot projection, ownership resolution.

pub mod label;
pub mod ownership;
pub mod slots;
