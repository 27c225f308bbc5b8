/// Nuclear-spin-statistics selection rule shared by the relaxation-matrix
/// builder and the mixing-coefficient calculator.
///
/// For isotopologues with interchange-symmetric nuclei, collisions only
/// couple lines whose lower-state rotational quantum numbers have the same
/// parity. The rule is keyed off the HITRAN local isotopologue id: active for
/// `iso > 2` except ids 7 and 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinStatisticsFilter {
    active: bool,
}

impl SpinStatisticsFilter {
    pub fn for_isotopologue(isotopologue: u32) -> Self {
        Self {
            active: isotopologue > 2 && isotopologue != 7 && isotopologue != 10,
        }
    }

    pub fn is_active(self) -> bool {
        self.active
    }

    /// Whether collisional coupling between two lines with the given
    /// lower-state rotational quantum numbers is permitted.
    pub fn allows(self, j_left: u32, j_right: u32) -> bool {
        !self.active || j_left.abs_diff(j_right) % 2 == 0
    }
}
