use embassy_executor::Spawner;
use log::{info, warn};
use static_cell::StaticCell;
use touch_inject::{
    load_or_init, logging, spawn_reader, Config, DeviceSelector, FileCalibrationStore,
    HostChannel, LogPointerSink, PointerMapper, ReaderLink, ReaderSource, TouchBridge,
    INTERRUPT_IN_PIPE, TOUCH_DIGITIZER,
};

type HostBridge = TouchBridge<ReaderSource<'static>, LogPointerSink>;

/// Transfers from the reader thread to the bridge task.
static CHUNKS: StaticCell<HostChannel> = StaticCell::new();

/// Reader thread connection state.
static LINK: StaticCell<ReaderLink> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let config = Config::parse();
    logging::init(config.verbose);
    info!("touch-inject starting...");

    let mut store = FileCalibrationStore::new(&config.calibration);
    let calibration = load_or_init(&mut store);
    let mapper = PointerMapper::new(calibration, config.output_range);

    // A missing device is not fatal; the process stays up without events.
    let pipe = match config.selector().open(TOUCH_DIGITIZER, INTERRUPT_IN_PIPE) {
        Ok(pipe) => pipe,
        Err(e) => {
            warn!("No USB device found with {} ({})", TOUCH_DIGITIZER, e);
            return;
        }
    };

    let channel: &'static HostChannel = CHUNKS.init(HostChannel::new());
    let link: &'static ReaderLink = LINK.init(ReaderLink::new());

    if let Err(e) = spawn_reader(pipe, channel.sender(), link) {
        warn!("Failed to start reader thread: {}", e);
        return;
    }

    let bridge = TouchBridge::with_config(
        ReaderSource::new(channel.receiver(), link),
        LogPointerSink::new(),
        mapper,
        config.sync_policy,
    );

    // Spawn tasks (spawn the SpawnToken, then unwrap the result)
    spawner.spawn(bridge_task(bridge)).unwrap();

    info!("touch-inject initialized, waiting for touches...");
}

/// Bridge task - decodes transfers and injects pointer events.
#[embassy_executor::task]
async fn bridge_task(mut bridge: HostBridge) {
    bridge.run().await
}
