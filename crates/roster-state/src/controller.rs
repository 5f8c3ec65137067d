//! [`ContactStateController`]: the draft form and the sort-driven contact
//! list, combined into one published [`UiState`].
//!
//! The contact list comes from whichever storage query the sort selector maps
//! to. Form and selector changes are folded in synchronously by
//! [`handle_event`]; contact lists arrive on a driver task that follows the
//! selector (switch-latest) and only holds a storage subscription while
//! someone is watching.
//!
//! [`handle_event`]: ContactStateController::handle_event

use std::{future::Future, sync::Arc, time::Duration};

use futures::StreamExt as _;
use roster_core::{Contact, ContactDao, ContactEvent, SortType, UiState};
use tokio::{runtime::Handle, sync::watch};
use tokio_util::{sync::CancellationToken, task::TaskTracker};
use tracing::{debug, warn};

use crate::{
  ControllerConfig,
  subscription::{ConsumerCount, StateSubscription},
};

// ─── Shared inputs ───────────────────────────────────────────────────────────

/// The active sort order, tagged with how many times it has changed. Contact
/// lists produced under an older generation are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Selection {
  sort_type:  SortType,
  generation: u64,
}

/// Channels shared by the controller and its driver task.
struct Inputs {
  selection: watch::Sender<Selection>,
  /// Draft form; its `contacts` and `sort_type` are never read.
  form:      watch::Sender<UiState>,
  ui:        watch::Sender<UiState>,
  consumers: ConsumerCount,
}

impl Inputs {
  fn new() -> Self {
    Self {
      selection: watch::Sender::new(Selection::default()),
      form:      watch::Sender::new(UiState::default()),
      ui:        watch::Sender::new(UiState::default()),
      consumers: ConsumerCount::new(),
    }
  }

  /// Recombine after a form or selector change, keeping the current list.
  fn refresh(&self) {
    self.ui.send_if_modified(|ui| {
      let sort_type = self.selection.borrow().sort_type;
      let next = self.form.borrow().combine(sort_type, &ui.contacts);
      replace_if_changed(ui, next)
    });
  }

  /// Recombine with a list delivered by the query of `generation`. Returns
  /// `false` if the selector has moved on and the list was dropped.
  fn deliver(&self, generation: u64, contacts: &[Contact]) -> bool {
    let mut fresh = true;
    self.ui.send_if_modified(|ui| {
      let selection = *self.selection.borrow();
      if selection.generation != generation {
        fresh = false;
        return false;
      }
      let next = self.form.borrow().combine(selection.sort_type, contacts);
      replace_if_changed(ui, next)
    });
    fresh
  }
}

fn replace_if_changed(current: &mut UiState, next: UiState) -> bool {
  if *current == next {
    return false;
  }
  *current = next;
  true
}

// ─── Controller ──────────────────────────────────────────────────────────────

/// View-model for the contact screen.
///
/// Background work (the driver and fire-and-forget writes) is scoped to the
/// controller: [`shutdown`](Self::shutdown) or dropping the controller
/// cancels all of it.
pub struct ContactStateController<D: ContactDao> {
  dao:     Arc<D>,
  inputs:  Arc<Inputs>,
  runtime: Handle,
  cancel:  CancellationToken,
  tasks:   TaskTracker,
}

impl<D: ContactDao> ContactStateController<D> {
  /// Create a controller and start its driver task.
  ///
  /// # Panics
  ///
  /// Panics if called outside a tokio runtime.
  pub fn new(dao: Arc<D>, config: ControllerConfig) -> Self {
    let inputs = Arc::new(Inputs::new());
    let cancel = CancellationToken::new();
    let tasks = TaskTracker::new();
    let runtime = Handle::current();

    tasks.spawn_on(
      drive(
        dao.clone(),
        inputs.clone(),
        config.stop_timeout(),
        cancel.clone(),
      ),
      &runtime,
    );

    Self {
      dao,
      inputs,
      runtime,
      cancel,
      tasks,
    }
  }

  /// Attach a consumer to the snapshot stream.
  pub fn state(&self) -> StateSubscription {
    StateSubscription::attach(self.inputs.ui.subscribe(), &self.inputs.consumers)
  }

  /// The latest snapshot, without attaching a consumer.
  pub fn snapshot(&self) -> UiState { self.inputs.ui.borrow().clone() }

  /// Apply a user intent.
  ///
  /// Form and selector changes are visible in [`snapshot`](Self::snapshot)
  /// when this returns. Writes are launched in the background and their
  /// outcome never reaches the snapshot.
  pub fn handle_event(&self, event: ContactEvent) {
    match event {
      ContactEvent::SetFirstName(first_name) => {
        self.update_form(|form| form.first_name = first_name);
      }
      ContactEvent::SetLastName(last_name) => {
        self.update_form(|form| form.last_name = last_name);
      }
      ContactEvent::SetPhoneNumber(phone_number) => {
        self.update_form(|form| form.phone_number = phone_number);
      }
      ContactEvent::ShowDialog => {
        self.update_form(|form| form.is_adding_contact = true);
      }
      ContactEvent::HideDialog => {
        self.update_form(|form| form.is_adding_contact = false);
      }
      ContactEvent::SortContact(sort_type) => self.select(sort_type),
      ContactEvent::SaveContact => self.save(),
      ContactEvent::DeleteContact(contact) => self.delete(contact),
    }
  }

  /// Cancel the driver and any in-flight writes, then wait for them to stop.
  pub async fn shutdown(self) {
    self.cancel.cancel();
    self.tasks.close();
    self.tasks.wait().await;
  }

  // ── Event helpers ─────────────────────────────────────────────────────────

  fn update_form(&self, apply: impl FnOnce(&mut UiState)) {
    self.inputs.form.send_modify(apply);
    self.inputs.refresh();
  }

  fn select(&self, sort_type: SortType) {
    let switched = self.inputs.selection.send_if_modified(|selection| {
      if selection.sort_type == sort_type {
        return false;
      }
      selection.sort_type = sort_type;
      selection.generation += 1;
      true
    });
    if switched {
      debug!(%sort_type, "sort order changed");
      self.inputs.refresh();
    }
  }

  fn save(&self) {
    let mut draft = None;
    self.inputs.form.send_if_modified(|form| {
      if !form.draft_is_complete() {
        return false;
      }
      draft = Some(form.draft());
      form.first_name.clear();
      form.last_name.clear();
      form.phone_number.clear();
      form.is_adding_contact = false;
      true
    });

    let Some(contact) = draft else {
      debug!("draft has blank fields, not saving");
      return;
    };
    self.inputs.refresh();

    let dao = self.dao.clone();
    self.launch("upsert", async move {
      let saved = dao.upsert_contact(contact).await?;
      debug!(id = ?saved.id, "contact saved");
      Ok::<(), D::Error>(())
    });
  }

  fn delete(&self, contact: Contact) {
    if !contact.is_persisted() {
      warn!(?contact, "ignoring delete of a contact that was never saved");
      return;
    }
    let dao = self.dao.clone();
    self.launch("delete", async move {
      let id = contact.id;
      dao.delete_contact(contact).await?;
      debug!(?id, "contact deleted");
      Ok::<(), D::Error>(())
    });
  }

  /// Run a write in the background. The result is only logged.
  fn launch<F>(&self, op: &'static str, write: F)
  where
    F: Future<Output = Result<(), D::Error>> + Send + 'static,
  {
    let cancel = self.cancel.clone();
    self.tasks.spawn_on(
      async move {
        tokio::select! {
          _ = cancel.cancelled() => debug!(op, "controller closed, abandoning write"),
          result = write => {
            if let Err(e) = result {
              warn!(op, error = %e, "contact write failed");
            }
          }
        }
      },
      &self.runtime,
    );
  }
}

impl<D: ContactDao> Drop for ContactStateController<D> {
  fn drop(&mut self) { self.cancel.cancel(); }
}

// ─── Driver ──────────────────────────────────────────────────────────────────

/// Hold a storage subscription while consumers are attached, and for
/// `stop_timeout` after the last one leaves.
async fn drive<D: ContactDao>(
  dao: Arc<D>,
  inputs: Arc<Inputs>,
  stop_timeout: Duration,
  cancel: CancellationToken,
) {
  let mut consumers = inputs.consumers.watch();

  loop {
    tokio::select! {
      _ = cancel.cancelled() => return,
      () = until_attached(&mut consumers) => {}
    }
    debug!("consumer attached, subscribing to contacts");

    let follow = follow_selection(&*dao, &inputs);
    tokio::pin!(follow);

    loop {
      tokio::select! {
        _ = cancel.cancelled() => return,
        () = &mut follow => return,
        () = until_detached(&mut consumers) => {}
      }
      debug!(?stop_timeout, "last consumer detached");

      tokio::select! {
        _ = cancel.cancelled() => return,
        () = &mut follow => return,
        () = tokio::time::sleep(stop_timeout) => break,
        () = until_attached(&mut consumers) => {
          debug!("consumer re-attached within grace period");
        }
      }
    }
    debug!("no consumers, releasing contact subscription");
  }
}

async fn until_attached(consumers: &mut watch::Receiver<usize>) {
  let open = consumers.wait_for(|n| *n > 0).await.is_ok();
  if !open {
    std::future::pending::<()>().await;
  }
}

async fn until_detached(consumers: &mut watch::Receiver<usize>) {
  let open = consumers.wait_for(|n| *n == 0).await.is_ok();
  if !open {
    std::future::pending::<()>().await;
  }
}

/// Subscribe to the query for the current selector and publish what it
/// delivers; on every selector change drop the old feed and start over.
async fn follow_selection<D: ContactDao>(dao: &D, inputs: &Inputs) {
  let mut selection = inputs.selection.subscribe();

  loop {
    let current = *selection.borrow_and_update();
    debug!(
      sort_type = %current.sort_type,
      generation = current.generation,
      "subscribing to contact query"
    );
    let mut feed = dao.contacts_ordered_by(current.sort_type);

    loop {
      tokio::select! {
        changed = selection.changed() => {
          if changed.is_err() {
            return;
          }
          break;
        }
        next = feed.next() => match next {
          Some(contacts) => {
            if !inputs.deliver(current.generation, &contacts) {
              debug!(generation = current.generation, "discarded stale contact list");
            }
          }
          None => {
            warn!(sort_type = %current.sort_type, "contact query ended");
            if selection.changed().await.is_err() {
              return;
            }
            break;
          }
        }
      }
    }
  }
}
