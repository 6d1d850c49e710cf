#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CpuState {
    Running,
    Stopped,
    Halted,
}

impl std::fmt::Display for CpuState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            CpuState::Running => write!(f, "RUNNING"),
            CpuState::Stopped => write!(f, "STOPPED"),
            CpuState::Halted => write!(f, "HALTED"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Ime {
    pub enabled: bool,
    /// EI takes effect after the instruction that follows it.
    pub enable_pending: bool,
}

#[derive(Clone, Debug)]
pub struct StateManager {
    state: CpuState,
    ime: Ime,
}

impl Default for StateManager {
    fn default() -> StateManager {
        StateManager::new()
    }
}

impl StateManager {
    pub fn new() -> StateManager {
        StateManager {
            state: CpuState::Running,
            ime: Ime {
                enabled: true,
                enable_pending: false,
            },
        }
    }

    #[inline]
    pub fn state(&self) -> CpuState {
        self.state
    }

    #[inline]
    pub fn set_state(&mut self, state: CpuState) {
        self.state = state;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == CpuState::Running
    }

    #[inline]
    pub fn interrupts_enabled(&self) -> bool {
        self.ime.enabled
    }

    pub fn set_ime(&mut self, enabled: bool) {
        self.ime.enabled = enabled;
        self.ime.enable_pending = false;
    }

    pub fn schedule_ime(&mut self) {
        self.ime.enable_pending = true;
    }

    /// Called once an instruction has completed.
    pub(crate) fn commit_ime(&mut self) {
        if self.ime.enable_pending {
            self.ime.enabled = true;
            self.ime.enable_pending = false;
        }
    }

    pub(crate) fn has_pending_ime(&self) -> bool {
        self.ime.enable_pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_running_with_interrupts_enabled() {
        let state = StateManager::new();

        assert_eq!(state.state(), CpuState::Running);
        assert!(state.interrupts_enabled());
    }

    #[test]
    fn pending_enable_is_committed_later() {
        let mut state = StateManager::new();

        state.set_ime(false);
        state.schedule_ime();
        assert!(!state.interrupts_enabled());
        state.commit_ime();
        assert!(state.interrupts_enabled());
    }

    #[test]
    fn disable_cancels_pending_enable() {
        let mut state = StateManager::new();

        state.schedule_ime();
        state.set_ime(false);
        state.commit_ime();
        assert!(!state.interrupts_enabled());
    }
}
