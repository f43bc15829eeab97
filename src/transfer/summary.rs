use super::Remapping;

/// Tallies of a transfer.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    pub contained: u64,
    pub clipped: u64,
    pub unplaced: u64,
    pub overhanging: u64,
    pub sub_codon: u64,
    pub incomplete_features: u64,
    pub dropped_features: u64,
}

impl Summary {
    pub fn add_remapping(&mut self, remapping: &Remapping) {
        match remapping {
            Remapping::Contained(_) => self.contained += 1,
            Remapping::Clipped(_) => self.clipped += 1,
            Remapping::Unplaced => self.unplaced += 1,
            Remapping::Overhanging => self.overhanging += 1,
            Remapping::SubCodon => self.sub_codon += 1,
        }
    }

    pub fn add(&mut self, other: &Summary) {
        self.contained += other.contained;
        self.clipped += other.clipped;
        self.unplaced += other.unplaced;
        self.overhanging += other.overhanging;
        self.sub_codon += other.sub_codon;
        self.incomplete_features += other.incomplete_features;
        self.dropped_features += other.dropped_features;
    }

    /// Returns the number of intervals that were dropped.
    pub fn dropped_intervals(&self) -> u64 {
        self.unplaced + self.overhanging + self.sub_codon
    }
}
