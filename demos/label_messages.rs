use std::io;

use telerivet::{QueryOptions, Resource, TelerivetClientBuilder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let project_id = std::env::var("TELERIVET_PROJECT_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "TELERIVET_PROJECT_ID environment variable is required",
        )
    })?;
    let label_name = std::env::var("TELERIVET_LABEL").unwrap_or_else(|_| "Reviewed".to_owned());

    let client = TelerivetClientBuilder::from_env()?.build()?;
    let project = client.init_project_by_id(project_id)?;
    let label = project.get_or_create_label(label_name).await?;

    let mut messages = project
        .query_messages(QueryOptions::new().eq("direction", "incoming"))
        .limit(10);
    while let Some(message) = messages.next().await? {
        message.add_label(&label).await?;
        println!("labelled {}", message.id());
    }

    Ok(())
}
