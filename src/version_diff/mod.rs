/// Version-diff core: build model, RPM ordering, sources and classification
pub mod domain;
pub mod policies;
pub mod services;
