/// Rules for features that do not map cleanly onto the target.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Policy {
    clip_out_of_bounds: bool,
    treat_ambiguous_as_exact: bool,
}

impl Policy {
    pub const fn new(clip_out_of_bounds: bool, treat_ambiguous_as_exact: bool) -> Self {
        Self {
            clip_out_of_bounds,
            treat_ambiguous_as_exact,
        }
    }

    /// Whether intervals overhanging one edge of the target are truncated
    /// rather than dropped.
    pub fn clip_out_of_bounds(&self) -> bool {
        self.clip_out_of_bounds
    }

    /// Whether `<` and `>` edge markers from the source are discarded.
    pub fn treat_ambiguous_as_exact(&self) -> bool {
        self.treat_ambiguous_as_exact
    }
}
