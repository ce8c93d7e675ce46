//! Headless host that records everything the widget asks of the page.

use super::{Control, WidgetHost};
use parking_lot::Mutex;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Error { container_id: String, message: String },
    Button { container_id: String, style: String, label: String },
    Modal { title: String },
    ModalVisible(bool),
    OtpStep,
    ControlEnabled(Control, bool),
    Alert(String),
    Success(String),
    Navigate(String),
}

#[derive(Default)]
pub struct RecordingHost {
    containers: HashSet<String>,
    events: Mutex<Vec<HostEvent>>,
}

impl RecordingHost {
    pub fn with_containers<I, S>(containers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            containers: containers.into_iter().map(Into::into).collect(),
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    pub fn button_label(&self) -> Option<String> {
        self.events.lock().iter().rev().find_map(|e| match e {
            HostEvent::Button { label, .. } => Some(label.clone()),
            _ => None,
        })
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                HostEvent::Alert(msg) => Some(msg.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                HostEvent::Navigate(url) => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn modal_renders(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|e| matches!(e, HostEvent::Modal { .. }))
            .count()
    }

    pub fn is_modal_visible(&self) -> bool {
        self.events
            .lock()
            .iter()
            .rev()
            .find_map(|e| match e {
                HostEvent::ModalVisible(v) => Some(*v),
                HostEvent::Modal { .. } => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    fn push(&self, event: HostEvent) {
        self.events.lock().push(event);
    }
}

impl WidgetHost for RecordingHost {
    fn has_container(&self, container_id: &str) -> bool {
        self.containers.contains(container_id)
    }

    fn render_error(&self, container_id: &str, message: &str) {
        self.push(HostEvent::Error {
            container_id: container_id.to_string(),
            message: message.to_string(),
        });
    }

    fn render_button(&self, container_id: &str, style: &str, label: &str) {
        self.push(HostEvent::Button {
            container_id: container_id.to_string(),
            style: style.to_string(),
            label: label.to_string(),
        });
    }

    fn render_modal(&self, title: &str) {
        self.push(HostEvent::Modal {
            title: title.to_string(),
        });
    }

    fn set_modal_visible(&self, visible: bool) {
        self.push(HostEvent::ModalVisible(visible));
    }

    fn show_otp_step(&self) {
        self.push(HostEvent::OtpStep);
    }

    fn set_control_enabled(&self, control: Control, enabled: bool) {
        self.push(HostEvent::ControlEnabled(control, enabled));
    }

    fn alert(&self, message: &str) {
        self.push(HostEvent::Alert(message.to_string()));
    }

    fn show_success(&self, message: &str) {
        self.push(HostEvent::Success(message.to_string()));
    }

    fn navigate(&self, url: &str) {
        self.push(HostEvent::Navigate(url.to_string()));
    }
}
