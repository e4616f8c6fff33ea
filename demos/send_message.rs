use std::io;

use telerivet::{Resource, SendMessage, TelerivetClientBuilder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let project_id = std::env::var("TELERIVET_PROJECT_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "TELERIVET_PROJECT_ID environment variable is required",
        )
    })?;
    let to_number = std::env::var("TELERIVET_TO_NUMBER").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "TELERIVET_TO_NUMBER environment variable is required",
        )
    })?;
    let content = std::env::var("TELERIVET_MESSAGE")
        .unwrap_or_else(|_| "Hello from the telerivet demo.".to_owned());

    let client = TelerivetClientBuilder::from_env()?.build()?;
    let project = client.init_project_by_id(project_id)?;

    let message = project
        .send_message(&SendMessage::to_number(to_number, content))
        .await?;
    println!("id: {}, status: {:?}", message.id(), message.status()?);

    Ok(())
}
