use serde::Deserialize;
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Deserialize, Debug, Hash, Eq, PartialEq, Copy, Clone)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    W,
    A,
    S,
    D,
    Space,
    LShift,
    R,
    F,
    L,
    B,
    N,
    Escape,
}

pub struct InputMapper<S: Eq + Hash + Copy, K: Eq + Hash + Copy> {
    inner_state: HashMap<K, f32>,
    configuration: HashMap<S, Vec<(K, f32)>>,
}

impl<S: Eq + Hash + Copy, K: Eq + Hash + Copy> InputMapper<S, K> {
    pub fn with_configuration(configuration: impl Into<HashMap<S, Vec<(K, f32)>>>) -> Self {
        let configuration = configuration.into();

        let mut inner_state = HashMap::new();

        for value in configuration.values() {
            for (name, _) in value {
                inner_state.insert(*name, 0.0);
            }
        }

        Self {
            configuration,
            inner_state,
        }
    }

    pub fn update(&mut self, is_pressed: impl Fn(S) -> bool) {
        let mut new_inputs = self.inner_state.keys().map(|&k| (k, 0.0)).collect::<HashMap<_, _>>();

        for (key, rules) in &self.configuration {
            if is_pressed(*key) {
                for (axis, value) in rules {
                    *new_inputs.entry(*axis).or_default() += *value;
                }
            }
        }

        self.inner_state = new_inputs;
    }

    pub fn get_value(&self, axis: K) -> f32 {
        *self.inner_state.get(&axis).unwrap_or(&0.0)
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ScriptEvent {
    Tap { at: f32, key: Key },
    Hold { at: f32, key: Key, duration: f32 },
    Mouse { at: f32, dx: i32, dy: i32 },
    Scroll { at: f32, amount: f32 },
}

impl ScriptEvent {
    pub fn at(&self) -> f32 {
        match self {
            ScriptEvent::Tap { at, .. }
            | ScriptEvent::Hold { at, .. }
            | ScriptEvent::Mouse { at, .. }
            | ScriptEvent::Scroll { at, .. } => *at,
        }
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct FrameInput {
    pub taps: Vec<Key>,
    pub mouse: (i32, i32),
    pub scroll: f32,
}

pub struct ScriptedInput {
    events: Vec<ScriptEvent>,
    cursor: usize,
    holds: Vec<(Key, f32)>,
}

impl ScriptedInput {
    pub fn new(mut events: Vec<ScriptEvent>) -> Self {
        events.sort_by(|a, b| a.at().total_cmp(&b.at()));

        Self {
            events,
            cursor: 0,
            holds: Vec::new(),
        }
    }

    pub fn poll(&mut self, now: f32) -> FrameInput {
        let mut frame = FrameInput::default();

        self.holds.retain(|(_, until)| *until > now);

        while let Some(event) = self.events.get(self.cursor) {
            if event.at() > now {
                break;
            }

            match *event {
                ScriptEvent::Tap { key, .. } => frame.taps.push(key),
                ScriptEvent::Hold { at, key, duration } => self.holds.push((key, at + duration)),
                ScriptEvent::Mouse { dx, dy, .. } => {
                    frame.mouse.0 += dx;
                    frame.mouse.1 += dy;
                }
                ScriptEvent::Scroll { amount, .. } => frame.scroll += amount,
            }

            self.cursor += 1;
        }

        frame
    }

    pub fn is_held(&self, key: Key, now: f32) -> bool {
        self.holds.iter().any(|&(k, until)| k == key && now < until)
    }

    pub fn finished(&self) -> bool {
        self.cursor >= self.events.len() && self.holds.is_empty()
    }
}
