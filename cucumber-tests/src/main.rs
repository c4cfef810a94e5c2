use cucumber::{cli, World};
use cucumber_tests::features::world::ShelfgateWorld;

#[tokio::main]
async fn main() {
    ShelfgateWorld::cucumber()
        .with_cli::<()>(cli::Opts::parsed())
        .run_and_exit("features/")
        .await;
}
