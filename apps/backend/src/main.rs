#[tokio::main]
async fn main() -> anyhow::Result<()> {
    essay_checker_backend::run().await
}
