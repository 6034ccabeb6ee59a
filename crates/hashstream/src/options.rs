/// Largest source the load protocol addresses by default.
pub const DEFAULT_MAX_SIZE: u64 = u32::MAX as u64;

/// How the bulk load pulls bytes out of the source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReadStrategy {
    /// One `read` call for the whole source; any short read is rejected.
    #[default]
    Single,
    /// Keep reading until the buffer is full or the source hits EOF.
    Fill,
}

#[derive(Clone, Copy, Debug)]
pub struct CacheOptions {
    max_size:      u64,
    read_strategy: ReadStrategy,
}

impl Default for CacheOptions {
    fn default() -> Self { Self::new() }
}

impl CacheOptions {
    pub fn new() -> Self {
        Self {
            max_size:      DEFAULT_MAX_SIZE,
            read_strategy: ReadStrategy::default(),
        }
    }

    pub fn max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn read_strategy(mut self, read_strategy: ReadStrategy) -> Self {
        self.read_strategy = read_strategy;
        self
    }

    pub fn get_max_size(&self) -> u64 { self.max_size }

    pub fn get_read_strategy(&self) -> ReadStrategy { self.read_strategy }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CacheOptions::default();
        assert_eq!(options.get_max_size(), DEFAULT_MAX_SIZE);
        assert_eq!(options.get_read_strategy(), ReadStrategy::Single);
    }

    #[test]
    fn test_builder() {
        let options = CacheOptions::new().max_size(64).read_strategy(ReadStrategy::Fill);
        assert_eq!(options.get_max_size(), 64);
        assert_eq!(options.get_read_strategy(), ReadStrategy::Fill);
    }
}
