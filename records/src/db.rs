use futures_util::TryStreamExt;
use mongodb::{
    Client, Collection, Database,
    bson::{Document, doc},
    options::ClientOptions,
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument};

/// Picks `db_name` if given, otherwise the database named in the connection URI.
pub fn database(client: &Client, db_name: Option<&str>) -> Option<Database> {
    match db_name {
        Some(name) => Some(client.database(name)),
        None => client.default_database(),
    }
}

pub fn get_collection<T>(db: &Database, collection_name: &str) -> Collection<T>
where
    T: Send + Sync + Serialize + DeserializeOwned,
{
    db.collection::<T>(collection_name)
}

/// Creates a client without touching the network.
pub async fn lazy_client(uri: &str) -> mongodb::error::Result<Client> {
    let mut client_options = ClientOptions::parse(uri).await?;

    client_options.app_name = Some(env!("CARGO_CRATE_NAME").to_string());

    Client::with_options(client_options)
}

/// Creates a client and pings the server to see if it can connect to the cluster.
pub async fn client(uri: &str, db_name: Option<&str>) -> mongodb::error::Result<Client> {
    let client = lazy_client(uri).await?;

    if let Some(db) = database(&client, db_name) {
        db.run_command(doc! {"ping": 1}).await?;
    }

    Ok(client)
}

/// Reads every document matching `filter`, sorted by `sort`.
#[instrument(skip_all, fields(collection = collection.name(), filter = filter.to_string()))]
pub async fn find_all_sorted<T>(
    collection: &Collection<T>,
    filter: Document,
    sort: Document,
) -> mongodb::error::Result<Vec<T>>
where
    T: DeserializeOwned + Send + Sync,
{
    let items: Vec<T> = collection
        .find(filter)
        .sort(sort)
        .await?
        .try_collect()
        .await?;

    debug!(count = items.len(), "fetched documents");
    Ok(items)
}
