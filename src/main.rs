#[tokio::main]
async fn main() {
    meeting_backend::run().await;
}
