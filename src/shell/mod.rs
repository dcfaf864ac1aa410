//! Terminal presentation of the watchlist.
//!
//! [`Page`] composes the list, the form and the delete prompt the way the
//! browser page does. [`Shell`] reads commands line by line, applies them to
//! the page and prints whichever view is on top.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::{
    controllers::{ConfirmationGate, FormController, FormMode, FormOutcome, ListController},
    gateway::MediaGateway,
    models::{Media, MediaField, MediaId},
    visibility::{ManualTrigger, ScrollPoll},
};

pub mod command;
pub mod render;

pub use command::Command;

/// What currently has the user's attention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Form,
    Confirm(MediaId),
}

/// The watchlist page: list, optional form and delete prompt
pub struct Page {
    gateway: Arc<dyn MediaGateway>,
    list: ListController,
    form: Option<FormController>,
    gate: ConfirmationGate,
}

impl Page {
    pub fn new(gateway: Arc<dyn MediaGateway>, page_size: u32) -> Self {
        Self {
            list: ListController::new(gateway.clone(), page_size),
            gateway,
            form: None,
            gate: ConfirmationGate::new(),
        }
    }

    pub async fn mount(&mut self) {
        self.list.mount().await;
    }

    pub fn unmount(&mut self) {
        self.list.unmount();
    }

    pub fn list(&self) -> &ListController {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListController {
        &mut self.list
    }

    pub fn form(&self) -> Option<&FormController> {
        self.form.as_ref()
    }

    pub fn gate(&self) -> &ConfirmationGate {
        &self.gate
    }

    /// The delete prompt sits above the form, the form above the list
    pub fn view(&self) -> View {
        match (self.gate.pending(), &self.form) {
            (Some(id), _) => View::Confirm(id),
            (None, Some(_)) => View::Form,
            (None, None) => View::List,
        }
    }

    pub fn open_create(&mut self) {
        self.form = Some(FormController::create());
    }

    /// Opens the form on `record`
    pub fn open_edit(&mut self, record: Media) {
        self.form = Some(FormController::edit(record));
    }

    /// Opens the form on a loaded row; false when the id is not loaded
    pub fn edit_loaded(&mut self, id: MediaId) -> bool {
        match self.list.state().find(id).cloned() {
            Some(record) => {
                self.open_edit(record);
                true
            }
            None => false,
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    pub fn set_field(&mut self, field: MediaField, value: &str) -> Result<(), String> {
        let form = self
            .form
            .as_mut()
            .ok_or_else(|| "no form is open, use 'add' or 'edit <id>'".to_string())?;
        form.set_field(field, value)
    }

    /// Submits the open form
    ///
    /// A save closes the form and drops the edit target. A created entry
    /// reloads page 1; an edited one is swapped in place so pages loaded
    /// past the first stay. Anything else leaves the form open as it was.
    pub async fn submit_form(&mut self) -> Option<FormOutcome> {
        let form = self.form.as_ref()?;
        let mode = form.mode();
        let outcome = form.submit(self.gateway.as_ref()).await;

        if let FormOutcome::Saved(saved) = &outcome {
            self.form = None;
            match mode {
                FormMode::Create => self.list.refresh().await,
                FormMode::Edit => {
                    if !self.list.replace(saved.clone()) {
                        self.list.refresh().await;
                    }
                }
            }
        }

        Some(outcome)
    }

    /// Opens the delete prompt for a loaded row
    pub fn request_delete(&mut self, id: MediaId) -> bool {
        if self.list.state().find(id).is_none() {
            return false;
        }
        self.gate.request(id);
        true
    }

    /// Runs the pending delete; the prompt stays open if it fails
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(confirmed) = self.gate.confirm() else {
            return false;
        };

        let deleted = self.list.delete(confirmed).await;
        if deleted {
            self.gate.resolve(confirmed);
        }
        deleted
    }

    pub fn cancel_delete(&mut self) {
        self.gate.cancel();
    }
}

/// Line-oriented driver around a [`Page`]
pub struct Shell {
    page: Page,
    trigger: ManualTrigger,
    scroll: ScrollPoll,
}

impl Shell {
    pub fn new(page: Page, viewport_rows: usize) -> Self {
        Self {
            page,
            trigger: ManualTrigger::new(),
            scroll: ScrollPoll::new(viewport_rows),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Reads commands until `quit` or end of input
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        self.page.mount().await;
        self.poll_visibility().await;
        output.write_all(self.render().as_bytes()).await?;
        output.write_all(b"> ").await?;
        output.flush().await?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                output.write_all(b"> ").await?;
                output.flush().await?;
                continue;
            }

            let reply = match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.handle(command).await,
                Err(message) => Some(message),
            };

            self.poll_visibility().await;

            if let Some(reply) = reply {
                output.write_all(reply.as_bytes()).await?;
                output.write_all(b"\n").await?;
            }
            output.write_all(self.render().as_bytes()).await?;
            output.write_all(b"> ").await?;
            output.flush().await?;
        }

        self.page.unmount();
        Ok(())
    }

    /// Applies one command; returns a message for the user, if any
    pub async fn handle(&mut self, command: Command) -> Option<String> {
        match command {
            Command::List | Command::Show => None,
            Command::More => {
                self.trigger.trigger();
                None
            }
            Command::Down => {
                self.scroll.scroll_down(self.page.list().records().len());
                None
            }
            Command::Up => {
                self.scroll.scroll_up();
                None
            }
            Command::Help => Some(command::HELP.to_string()),
            Command::Add => {
                self.page.open_create();
                None
            }
            Command::Edit(id) => {
                (!self.page.edit_loaded(id)).then(|| format!("No loaded entry with id {}", id))
            }
            Command::Delete(id) => {
                (!self.page.request_delete(id)).then(|| format!("No loaded entry with id {}", id))
            }
            Command::Set(field, value) => self.page.set_field(field, &value).err(),
            Command::Save => {
                let mode = self.page.form().map(FormController::mode);
                match self.page.submit_form().await {
                    None => Some("No form is open".to_string()),
                    Some(FormOutcome::Incomplete(missing)) => {
                        let names: Vec<&str> = missing.iter().map(MediaField::label).collect();
                        Some(format!("Please fill in: {}", names.join(", ")))
                    }
                    Some(FormOutcome::Saved(_)) => {
                        if mode == Some(FormMode::Create) {
                            self.scroll.reset();
                        }
                        None
                    }
                    Some(FormOutcome::Failed) => None,
                }
            }
            Command::Confirm => {
                self.page.confirm_delete().await;
                None
            }
            Command::Cancel => {
                if self.page.gate().is_open() {
                    self.page.cancel_delete();
                } else {
                    self.page.close_form();
                }
                None
            }
            Command::Quit => None,
        }
    }

    /// Loads pages while a visibility signal fires over the list
    ///
    /// The scroll window is polled again after each load and stops once the
    /// last row leaves it or a fetch adds nothing.
    async fn poll_visibility(&mut self) {
        self.scroll.clamp(self.page.list().records().len());
        if self.page.view() != View::List {
            return;
        }

        let list = self.page.list_mut();
        list.poll(&mut self.trigger).await;
        loop {
            let before = list.records().len();
            if !list.poll(&mut self.scroll).await || list.records().len() == before {
                break;
            }
        }
    }

    pub fn render(&self) -> String {
        match self.page.view() {
            View::Confirm(id) => render::confirm(id),
            View::Form => self.page.form().map(render::form).unwrap_or_default(),
            View::List => {
                let state = self.page.list().state();
                let window = self.scroll.visible_range(state.records().len());
                render::list(state, window)
            }
        }
    }
}
