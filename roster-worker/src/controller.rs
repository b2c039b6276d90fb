/// Command controller
///
/// The controller is the only component that calls the store on behalf of
/// users. It owns a `Store` and the `SearchSession` built from the last full
/// read, and keeps the two consistent: `LoadAll` and every successful write
/// reload the session.
///
/// Filter commands issued before anything was loaded read the store once
/// first, so they never run against an empty placeholder set.
///
/// # Example
///
/// ```no_run
/// use roster_shared::db::pool::DatabaseConfig;
/// use roster_shared::models::record::NewRecord;
/// use roster_shared::store::Store;
/// use roster_worker::command::{Command, Outcome};
/// use roster_worker::controller::Controller;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Store::open(DatabaseConfig::for_path("roster.db")).await?;
/// let mut controller = Controller::new(store);
///
/// controller
///     .dispatch(Command::CreateRecord(NewRecord::new("Ana", "a@x.com").city("Lima")))
///     .await?;
///
/// if let Outcome::Records(hits) = controller.dispatch(Command::FilterQuery("lima".into())).await? {
///     assert_eq!(hits.len(), 1);
/// }
/// # Ok(())
/// # }
/// ```

use crate::command::{Command, Outcome};
use roster_shared::error::StoreResult;
use roster_shared::search::SearchSession;
use roster_shared::store::Store;
use tracing::{debug, warn};

/// Maps commands onto the store and the search session
#[derive(Debug)]
pub struct Controller {
    store: Store,
    session: SearchSession,
}

impl Controller {
    /// Creates a controller with nothing loaded yet
    pub fn new(store: Store) -> Self {
        Controller {
            store,
            session: SearchSession::new(),
        }
    }

    /// The underlying store
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The current search session
    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Gives the store back, dropping the session
    pub fn into_store(self) -> Store {
        self.store
    }

    /// Handles one command
    ///
    /// # Errors
    ///
    /// Returns the store error of the failed operation unchanged. A failed
    /// write leaves the session as it was.
    pub async fn dispatch(&mut self, command: Command) -> StoreResult<Outcome> {
        debug!(
            command = command.name(),
            write = command.is_write(),
            "Dispatching command"
        );

        match command {
            Command::CreateRecord(record) => {
                let id = self.store.create(record).await?;
                self.refresh_after_write().await;
                Ok(Outcome::Created(id))
            }
            Command::UpdateRecord(record) => {
                let id = record.id;
                self.store.update(&record).await?;
                self.refresh_after_write().await;
                Ok(Outcome::Updated(id))
            }
            Command::DeleteRecord(id) => {
                self.store.delete(id).await?;
                self.refresh_after_write().await;
                Ok(Outcome::Deleted(id))
            }
            Command::LoadAll => {
                self.reload().await?;
                Ok(Outcome::Records(self.session.results().to_vec()))
            }
            Command::LoadById(id) => Ok(Outcome::Record(self.store.read_by_id(id).await?)),
            Command::SearchByName(fragment) => Ok(Outcome::Records(
                self.store.search_by_name(&fragment).await?,
            )),
            Command::FilterQuery(text) => {
                self.ensure_loaded().await?;
                Ok(Outcome::Records(self.session.query(&text).to_vec()))
            }
            Command::CityQuery(text) => {
                self.ensure_loaded().await?;
                Ok(Outcome::Records(self.session.query_city(&text).to_vec()))
            }
            Command::ResetFilter => {
                self.ensure_loaded().await?;
                Ok(Outcome::Records(self.session.reset().to_vec()))
            }
            Command::CitySuggestions => {
                self.ensure_loaded().await?;
                Ok(Outcome::Cities(self.session.city_suggestions()))
            }
            Command::Count => Ok(Outcome::Count(self.store.count().await?)),
        }
    }

    async fn reload(&mut self) -> StoreResult<()> {
        let records = self.store.read_all().await?;
        self.session.load(records);
        Ok(())
    }

    async fn ensure_loaded(&mut self) -> StoreResult<()> {
        if !self.session.is_loaded() {
            self.reload().await?;
        }
        Ok(())
    }

    /// The write already succeeded, so a failed reload must not turn it into
    /// an error. The session is dropped instead and reloads on next use.
    async fn refresh_after_write(&mut self) {
        if let Err(e) = self.reload().await {
            warn!(error = %e, "Reload after write failed, discarding search session");
            self.session = SearchSession::new();
        }
    }
}
