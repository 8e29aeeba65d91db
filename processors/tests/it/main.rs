mod pipeline;

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_test_writer()
        .try_init()
        .ok();
}
