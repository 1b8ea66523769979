#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Jump,
}

const ACTION_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }

    // Opposing presses cancel out, so the result is always -1, 0 or 1.
    pub(crate) fn axis(&self, negative: InputAction, positive: InputAction) -> i8 {
        i8::from(self.is_down(positive)) - i8::from(self.is_down(negative))
    }
}

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::MoveUp => 0,
            InputAction::MoveDown => 1,
            InputAction::MoveLeft => 2,
            InputAction::MoveRight => 3,
            InputAction::Jump => 4,
        }
    }
}

/// Turns a held key into a single pulse on the press transition.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PressEdge {
    is_down: bool,
    pressed: bool,
}

impl PressEdge {
    pub(crate) fn handle(&mut self, is_pressed: bool) {
        if is_pressed && !self.is_down {
            self.pressed = true;
        }
        self.is_down = is_pressed;
    }

    pub(crate) fn is_down(&self) -> bool {
        self.is_down
    }

    pub(crate) fn take(&mut self) -> bool {
        std::mem::take(&mut self.pressed)
    }
}
