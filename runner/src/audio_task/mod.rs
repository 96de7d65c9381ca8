pub mod hardware;

use defmt::{info, trace};
use embassy_executor::SpawnToken;
use embassy_stm32::peripherals;
use embassy_stm32::usb;
use embassy_usb::class::uac1::microphone::{self, Volume};
use embassy_usb::driver::EndpointError;
use mic_stream::{Consumer, fill_packet};

use crate::RING_CAPACITY;
use hardware::{AUDIO_CHANNELS, AudioUsbHardware, USB_MAX_PACKET_SIZE};

struct Disconnected {}

impl From<EndpointError> for Disconnected {
    fn from(val: EndpointError) -> Self {
        match val {
            EndpointError::BufferOverflow => defmt::panic!("Buffer overflow"),
            EndpointError::Disabled => Disconnected {},
        }
    }
}

/// Streams one packet to the host per transmit opportunity.
///
/// Every packet is sent at the full negotiated size: slots the queue cannot
/// fill are silence. Ends when the host stops the stream.
async fn stream_handler<'d, T: usb::Instance + 'd>(
    stream: &mut microphone::Stream<'d, usb::Driver<'d, T>>,
    consumer: &mut Consumer<'static, RING_CAPACITY>,
) -> Result<(), Disconnected> {
    info!("USB Audio: Stream handler starting...");
    let mut packet = [0u8; USB_MAX_PACKET_SIZE];
    let mut packet_count = 0u32;

    loop {
        let supplied = fill_packet(consumer, &mut packet);
        trace!("USB Audio: packet with {} live samples", supplied);

        stream.write_packet(&packet).await?;

        packet_count += 1;
        if packet_count % 1000 == 0 {
            info!("USB Audio: Streamed {} packets", packet_count);
        }
    }
}

/// Sends buffered microphone samples to the host.
#[embassy_executor::task]
async fn usb_streaming_task(
    mut stream: microphone::Stream<'static, usb::Driver<'static, peripherals::USB_OTG_HS>>,
    mut consumer: Consumer<'static, RING_CAPACITY>,
) {
    loop {
        stream.wait_connection().await;
        info!("USB Audio: Connected - microphone streaming active");

        _ = stream_handler(&mut stream, &mut consumer).await;

        info!("USB Audio: Disconnected");
    }
}

/// Checks for changes on the control monitor of the class.
///
/// The host may adjust gain or mute; the stream itself carries raw PCM with
/// no processing, so changes are only reported.
#[embassy_executor::task]
async fn usb_control_task(control_monitor: microphone::ControlMonitor<'static>) {
    info!("USB Audio: Control task starting...");
    loop {
        control_monitor.changed().await;

        for channel in AUDIO_CHANNELS {
            match control_monitor.gain(channel).unwrap() {
                Volume::Muted => {
                    info!("USB Audio: Channel {} muted", channel);
                }
                Volume::DeciBel(vol_8q8) => {
                    let db_int = vol_8q8 / 256;
                    info!(
                        "USB Audio: Channel {} gain: {} dB (raw: {})",
                        channel, db_int, vol_8q8
                    );
                }
            }
        }

        let sample_rate = control_monitor.sample_rate_hz();
        info!("USB Audio: Sample rate: {} Hz", sample_rate);
    }
}

pub fn create_audio_tasks(
    audio_hardware: AudioUsbHardware<'static>,
    consumer: Consumer<'static, RING_CAPACITY>,
) -> (SpawnToken<impl Sized>, SpawnToken<impl Sized>) {
    info!("USB Audio: Creating tasks...");

    let control_task = usb_control_task(audio_hardware.control_monitor);
    let streaming_task = usb_streaming_task(audio_hardware.stream, consumer);

    (control_task, streaming_task)
}
