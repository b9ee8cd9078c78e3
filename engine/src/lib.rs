pub mod app;
pub mod audio;
pub mod goldens;
pub mod graphics;
pub mod pixels_renderer;
pub mod surface;
pub mod ui;

/// A deterministic, headless-steppable game core.
///
/// `step` must be a pure function of `(state, input)` so scripted runs are
/// reproducible and easy to assert against.
pub trait GameLogic {
    type State;
    type Input;

    fn initial_state(&self) -> Self::State;
    fn step(&self, state: &Self::State, input: Self::Input) -> Self::State;
}

/// Drives a `GameLogic` without a window, one input per frame.
#[derive(Debug)]
pub struct HeadlessRunner<G: GameLogic> {
    game: G,
    state: G::State,
    frame: usize,
}

impl<G: GameLogic> HeadlessRunner<G> {
    pub fn new(game: G) -> Self {
        let state = game.initial_state();
        Self {
            game,
            state,
            frame: 0,
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn state(&self) -> &G::State {
        &self.state
    }

    pub fn step(&mut self, input: G::Input) -> usize {
        self.state = self.game.step(&self.state, input);
        self.frame += 1;
        self.frame
    }

    pub fn run(&mut self, inputs: impl IntoIterator<Item = G::Input>) -> usize {
        for input in inputs {
            self.step(input);
        }
        self.frame
    }
}
