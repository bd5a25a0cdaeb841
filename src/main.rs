#[tokio::main]
async fn main() -> anyhow::Result<()> {
    marathon_tracker::bootstrapper::run().await
}
