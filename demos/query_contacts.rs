use std::io;

use telerivet::{Modifier, PageSize, QueryOptions, Resource, SortDirection, TelerivetClientBuilder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let project_id = std::env::var("TELERIVET_PROJECT_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "TELERIVET_PROJECT_ID environment variable is required",
        )
    })?;
    let prefix = std::env::var("TELERIVET_NAME_PREFIX").unwrap_or_default();

    let client = TelerivetClientBuilder::from_env()?.build()?;
    let project = client.init_project_by_id(project_id)?;

    let mut options = QueryOptions::new()
        .sort("name")
        .sort_dir(SortDirection::Asc)
        .page_size(PageSize::new(100)?);
    if !prefix.is_empty() {
        options = options.filter("name", Modifier::Prefix, prefix);
    }

    let total = project.query_contacts(options.clone()).count().await?;
    println!("{total} matching contacts");

    let mut contacts = project.query_contacts(options).limit(20);
    while let Some(contact) = contacts.next().await? {
        println!(
            "{} {:?} {:?}",
            contact.id(),
            contact.name()?,
            contact.phone_number()?
        );
    }

    Ok(())
}
