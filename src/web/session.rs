use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    boundary::{Command, CommandBuffer},
    controller::{Controller, UiEvent},
};

/// Open pages kept before the oldest is dropped.
pub const MAX_SESSIONS: usize = 1024;

pub type SessionId = u64;

/// Slider bounds the page needs before it can draw the control.
#[derive(Debug, Clone, Serialize)]
pub struct SliderSpec {
    pub minimum: i64,
    pub maximum: i64,
    pub value: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionInit {
    pub session: SessionId,
    pub slider: SliderSpec,
    pub commands: Vec<Command>,
}

/// Controller plus the recording boundary standing in for one browser page.
#[derive(Debug, Clone)]
pub struct Session {
    controller: Controller,
    boundary: CommandBuffer,
    slider: SliderSpec,
}

impl Session {
    pub fn new(controller: Controller, minimum: i64, maximum: i64, initial_value: i64) -> Self {
        Self {
            controller,
            boundary: CommandBuffer::new(initial_value),
            slider: SliderSpec {
                minimum,
                maximum,
                value: initial_value,
            },
        }
    }

    /// Runs the controller's initialization and returns its batch.
    fn start(&mut self) -> Vec<Command> {
        self.boundary = CommandBuffer::new(self.slider.value);
        self.controller.initialize(&mut self.boundary);
        self.boundary.drain()
    }

    /// Runs one event to completion and returns the updates for the page.
    pub fn dispatch(&mut self, event: &UiEvent) -> Vec<Command> {
        if let UiEvent::ControlChanged { value } = event {
            self.boundary.set_control_value(*value);
        }
        self.controller.handle(event, &mut self.boundary);
        self.boundary.drain()
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }
}

/// Independent sessions, one per open page, cloned from a configured template.
#[derive(Debug)]
pub struct SessionStore {
    template: Session,
    sessions: BTreeMap<SessionId, Session>,
    next_id: SessionId,
}

impl SessionStore {
    pub fn new(template: Session) -> Self {
        Self {
            template,
            sessions: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Opens a fresh session and returns its initialization batch.
    pub fn open(&mut self) -> SessionInit {
        let id = self.next_id;
        self.next_id += 1;

        let mut session = self.template.clone();
        let commands = session.start();
        let slider = session.slider.clone();
        self.sessions.insert(id, session);
        while self.sessions.len() > MAX_SESSIONS {
            self.sessions.pop_first();
        }

        SessionInit {
            session: id,
            slider,
            commands,
        }
    }

    /// `None` when the session is unknown or was evicted.
    pub fn dispatch(&mut self, id: SessionId, event: &UiEvent) -> Option<Vec<Command>> {
        self.sessions
            .get_mut(&id)
            .map(|session| session.dispatch(event))
    }

    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Model shared by every session, for the stateless report endpoints.
    pub fn template(&self) -> &Controller {
        self.template.controller()
    }
}
