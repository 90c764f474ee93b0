#[rocket::main]
async fn main() -> Result<(), rocket::Error> {
    api::launch().await.launch().await?;
    Ok(())
}
