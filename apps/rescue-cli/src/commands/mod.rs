pub mod simulate;
pub mod transitions;
