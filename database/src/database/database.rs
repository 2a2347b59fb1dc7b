use std::{
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Instant,
};

use num_format::{Locale, ToFormattedString};

use crate::{
    model::statement::Statement,
    persistence::{collection::CollectionManager, storage::StorageError},
};

use super::{
    commands::{
        Control, DatabaseCommand, DatabaseCommandRequest, DatabaseCommandResponse, StatementError,
    },
    options::DatabaseOptions,
    request_manager::RequestManager,
    table::table::PersonTable,
};

pub struct Database {
    person_table: PersonTable,
    collection_manager: CollectionManager,
    database_receiver: Receiver<DatabaseCommandRequest>,
    database_sender: Sender<DatabaseCommandRequest>,
    database_options: DatabaseOptions,
}

impl Database {
    pub fn new(options: DatabaseOptions) -> Self {
        let (database_sender, database_receiver) = mpsc::channel::<DatabaseCommandRequest>();

        Self {
            person_table: PersonTable::new(),
            collection_manager: CollectionManager::new(&options.storage_engine),
            database_receiver,
            database_sender,
            database_options: options,
        }
    }

    pub fn new_test() -> Self {
        Database::new(DatabaseOptions::new_test())
    }

    /// Restores the collection and starts the single writer thread. The restore runs
    /// on the caller's thread so an unreadable collection fails startup instead of
    /// killing the writer after the fact
    pub fn start(mut self) -> Result<RequestManager, StorageError> {
        log::info!("Collection: [{}]", self.database_options.storage_engine);

        if self.database_options.restore {
            self.restore()?;
        }

        let request_manager = RequestManager::new(self.database_sender.clone());

        thread::Builder::new()
            .name("database".to_string())
            .spawn(move || self.run())
            .expect("Should always be able to spawn the database thread");

        Ok(request_manager)
    }

    fn restore(&mut self) -> Result<(), StorageError> {
        let now = Instant::now();

        let document_count = self
            .collection_manager
            .restore_collection(&mut self.person_table)?;

        log::info!(
            "✅ Successful Restore [Duration: {}ms]",
            now.elapsed().as_millis(),
        );

        log::info!(
            "📀 Data               [Documents: {}]",
            document_count.to_formatted_string(&Locale::en),
        );

        Ok(())
    }

    // Processes incoming requests from the channel, runs until a shutdown is requested
    fn run(mut self) {
        loop {
            let DatabaseCommandRequest { command, resolver } = self
                .database_receiver
                .recv()
                .expect("Should always be able to receive requests while the database owns a sender");

            log::info!("Received request: {}", command.log_format());

            let statement = match command {
                DatabaseCommand::Statement(statement) => statement,
                DatabaseCommand::Control(Control::Shutdown) => {
                    let _ = resolver.send(DatabaseCommandResponse::control_success(
                        "Successfully shutdown database",
                    ));

                    return;
                }
            };

            let response = self.process_statement(statement);

            // Sends the response data back to the caller of the request (i.e.), the entity on the other end of the channel
            resolver
                .send(response)
                .expect("Should always be able to send a response back to the caller");
        }
    }

    pub fn process_statement(&mut self, statement: Statement) -> DatabaseCommandResponse {
        let is_mutation = statement.is_mutation();

        let statement_result = match self.person_table.apply(statement) {
            Ok(statement_result) => statement_result,
            Err(apply_error) => {
                return DatabaseCommandResponse::statement_failure(StatementError::Apply(
                    apply_error,
                ));
            }
        };

        if is_mutation {
            // The collection is rewritten as a whole after every mutation. When the write
            // fails the in-memory table is ahead of storage, the next successful save converges them
            if let Err(storage_error) = self.collection_manager.save_collection(&self.person_table)
            {
                log::error!("⚠️  Failed to persist collection: {}", storage_error);

                return DatabaseCommandResponse::statement_failure(StatementError::Persistence(
                    storage_error,
                ));
            }

            log::info!(
                "✅ Committed          [Documents: {}]",
                self.person_table
                    .document_count()
                    .to_formatted_string(&Locale::en),
            );
        }

        DatabaseCommandResponse::statement_commit(statement_result)
    }
}


pub mod test_utils {
    use uuid::Uuid;

    use crate::{
        database::{
            database::Database, options::DatabaseOptions, request_manager::RequestManager,
        },
        model::statement::{Statement, StatementResult},
        persistence::storage::StorageEngine,
    };
    use std::{
        path::PathBuf,
        thread::{self, JoinHandle},
    };

    /// Starts a file backed database and drives it from `worker_threads` request
    /// managers, asserting that every generated statement commits
    pub fn database_test(
        worker_threads: i32,
        statements: u32,
        statement_generator: fn(i32, u32) -> Statement,
    ) {
        let database_dir: PathBuf = ["/", "tmp", "pessoas", &Uuid::new_v4().to_string()]
            .iter()
            .collect();

        log::info!("Database directory: {}", database_dir.display());

        let options =
            DatabaseOptions::default().set_storage_engine(StorageEngine::File(database_dir));

        let request_manager: RequestManager = Database::new(options)
            .start()
            .expect("Should be able to start the database");

        let mut sender_threads: Vec<JoinHandle<()>> = vec![];

        for thread_id in 0..worker_threads {
            let rm = request_manager.clone();

            let sender_thread = thread::spawn(move || {
                for index in 0..statements {
                    let statement = statement_generator(thread_id, index);

                    let statement_result = rm.send_statement(statement).expect("Should not timeout");

                    // Single will panic if this fails
                    match statement_result {
                        StatementResult::Single(_) | StatementResult::List(_) => {}
                    }
                }
            });

            sender_threads.push(sender_thread);
        }

        for thread in sender_threads {
            thread.join().unwrap();
        }

        // Allows database thread to successfully exit
        let shutdown_response = request_manager
            .send_shutdown_request()
            .expect("Should not timeout");

        assert_eq!(
            shutdown_response,
            "Successfully shutdown database".to_string()
        );
    }
}
