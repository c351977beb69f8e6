//! Score tracking

/// Receives score credit from destroyed enemies
pub trait ScoreSink {
    fn increment(&mut self, amount: u32);
}

/// Running score for one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    value: u64,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn set(&mut self, value: u64) {
        self.value = value;
    }
}

impl ScoreSink for Score {
    fn increment(&mut self, amount: u32) {
        self.value += u64::from(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_accumulates() {
        let mut score = Score::new();
        score.increment(100);
        score.increment(100);
        assert_eq!(score.value(), 200);
        score.set(0);
        assert_eq!(score.value(), 0);
    }
}
