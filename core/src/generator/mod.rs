use crate::*;
pub use random::*;

mod random;

pub trait RoundGenerator {
    fn generate(&mut self, level: Level) -> Round;

    fn curve(&self) -> DifficultyCurve;
}
