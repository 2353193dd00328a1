//! Scripted fakes for the remote API and the interactive front end.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use anyhow::{Result, anyhow};

use openlist_organizer::front::{BrowserView, FrontEnd, NavEvent};
use openlist_organizer::remote::{
    ApiError, DirectoryEntry, DirectoryListing, LoginOutcome, RemoteApi, RenamePlanItem,
};

pub fn file(name: &str) -> DirectoryEntry {
    DirectoryEntry {
        name: name.to_string(),
        is_dir: false,
    }
}

pub fn dir(name: &str) -> DirectoryEntry {
    DirectoryEntry {
        name: name.to_string(),
        is_dir: true,
    }
}

/// Remote fake driven by queued script entries. Every call is recorded so
/// tests can assert on exactly which requests were issued, in order.
#[derive(Default)]
pub struct MockRemote {
    pub login_outcomes: RefCell<VecDeque<LoginOutcome>>,
    pub verify_results: RefCell<VecDeque<bool>>,
    /// Listable paths; a path absent from the map fails with a service error.
    pub listings: RefCell<HashMap<String, Vec<DirectoryEntry>>>,
    pub rename_ok: Cell<bool>,
    pub copy_ok: Cell<bool>,
    pub mkdir_ok: Cell<bool>,

    pub calls: RefCell<Vec<String>>,
    pub base_url: RefCell<String>,
    pub token: RefCell<String>,
    pub rename_batches: RefCell<Vec<(String, Vec<RenamePlanItem>)>>,
    pub copies: RefCell<Vec<(String, String, Vec<String>)>>,
    pub mkdirs: RefCell<Vec<String>>,
}

impl MockRemote {
    pub fn new() -> Self {
        let mock = Self::default();
        mock.rename_ok.set(true);
        mock.copy_ok.set(true);
        mock.mkdir_ok.set(true);
        mock
    }

    pub fn add_listing(&self, path: &str, entries: Vec<DirectoryEntry>) {
        self.listings.borrow_mut().insert(path.to_string(), entries);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }
}

impl RemoteApi for MockRemote {
    async fn login(&self, _username: &str, _password: &str) -> LoginOutcome {
        self.calls.borrow_mut().push("login".to_string());
        self.login_outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or(LoginOutcome::ServerError)
    }

    async fn verify_token(&self, token: &str) -> bool {
        self.calls.borrow_mut().push(format!("verify {token}"));
        self.verify_results.borrow_mut().pop_front().unwrap_or(false)
    }

    async fn list_directory(
        &self,
        path: &str,
        _page: u32,
        _per_page: u32,
        _refresh: bool,
    ) -> Result<DirectoryListing, ApiError> {
        self.calls.borrow_mut().push(format!("list {path}"));
        match self.listings.borrow().get(path) {
            Some(entries) => Ok(DirectoryListing {
                path: path.to_string(),
                entries: entries.clone(),
            }),
            None => Err(ApiError::Service {
                code: 500,
                message: format!("no such path {path}"),
            }),
        }
    }

    async fn rename_batch(&self, path: &str, items: &[RenamePlanItem]) -> bool {
        self.calls.borrow_mut().push(format!("rename {path}"));
        self.rename_batches
            .borrow_mut()
            .push((path.to_string(), items.to_vec()));
        self.rename_ok.get()
    }

    async fn copy_files(&self, src_dir: &str, dst_dir: &str, names: &[String]) -> bool {
        self.calls.borrow_mut().push(format!("copy {src_dir}"));
        self.copies
            .borrow_mut()
            .push((src_dir.to_string(), dst_dir.to_string(), names.to_vec()));
        self.copy_ok.get()
    }

    async fn mkdir(&self, path: &str) -> bool {
        self.calls.borrow_mut().push(format!("mkdir {path}"));
        self.mkdirs.borrow_mut().push(path.to_string());
        self.mkdir_ok.get()
    }

    fn set_base_url(&mut self, url: &str) {
        *self.base_url.borrow_mut() = url.to_string();
    }

    fn set_token(&mut self, token: &str) {
        *self.token.borrow_mut() = token.to_string();
    }
}

/// Front end that answers prompts and navigation from pre-loaded scripts.
/// An exhausted script fails the pending suspension, which both bounds the
/// test and mirrors operator cancellation.
#[derive(Default)]
pub struct ScriptedFrontEnd {
    pub replies: RefCell<VecDeque<String>>,
    pub events: RefCell<VecDeque<NavEvent>>,
    pub prompts_seen: RefCell<Vec<String>>,
    pub views_seen: RefCell<Vec<BrowserView>>,
    pub exited: Cell<bool>,
}

impl ScriptedFrontEnd {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_reply(&self, value: &str) {
        self.replies.borrow_mut().push_back(value.to_string());
    }

    pub fn push_events(&self, events: &[NavEvent]) {
        self.events.borrow_mut().extend(events.iter().copied());
    }

    pub fn prompts_seen(&self) -> Vec<String> {
        self.prompts_seen.borrow().clone()
    }
}

impl FrontEnd for ScriptedFrontEnd {
    async fn prompt_text(&self, label: &str, default: &str, _placeholder: &str) -> Result<String> {
        self.prompts_seen.borrow_mut().push(label.to_string());
        match self.replies.borrow_mut().pop_front() {
            // An empty scripted reply submits the prompt's default, like an
            // operator pressing Enter without editing.
            Some(reply) if reply.is_empty() => Ok(default.to_string()),
            Some(reply) => Ok(reply),
            None => Err(anyhow!("prompt script exhausted at {label:?}")),
        }
    }

    async fn next_nav_event(&self, view: BrowserView) -> Result<NavEvent> {
        self.views_seen.borrow_mut().push(view);
        self.events
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("navigation script exhausted"))
    }

    fn exit(&self) {
        self.exited.set(true);
    }
}
