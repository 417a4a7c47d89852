pub mod enricher;
pub mod matchers;
pub mod overrides;
