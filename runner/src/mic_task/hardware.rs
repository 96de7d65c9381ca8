use embassy_stm32::Peri;
use embassy_stm32::adc;
use embassy_stm32::peripherals;

// Raw samples per conversion block. One block covers exactly one USB frame,
// so the peripheral and the transport run at the same block size.
pub const SAMPLE_BLOCK_SIZE: usize = crate::audio_task::hardware::USB_FRAME_SAMPLES;

// Matches the microphone class sample rate of the USB side.
pub const SAMPLE_RATE_HZ: u32 = crate::audio_task::hardware::SAMPLE_RATE_HZ;

pub const SAMPLE_TIME: adc::SampleTime = adc::SampleTime::CYCLES64_5;

// Block cadence that realizes the sample rate. The ADC converts a block much
// faster than real time, so the task must hold each block to this period.
pub const BLOCK_RATE_HZ: u64 = SAMPLE_RATE_HZ as u64 / SAMPLE_BLOCK_SIZE as u64;

const _: () = assert!(BLOCK_RATE_HZ * SAMPLE_BLOCK_SIZE as u64 == SAMPLE_RATE_HZ as u64);

pub struct MicHardware<'d> {
    pub adc: adc::Adc<'d, peripherals::ADC1>,
    pub channel: adc::AnyAdcChannel<peripherals::ADC1>,
    pub dma: Peri<'d, peripherals::DMA1_CH1>,
}

#[macro_export]
macro_rules! get_mic_hardware {
    ($peripherals:ident) => {{
        use embassy_stm32::adc::AdcChannel;

        let adc = embassy_stm32::adc::Adc::new($peripherals.ADC1);

        $crate::mic_task::hardware::MicHardware {
            adc,
            channel: $peripherals.PA6.degrade_adc(),
            dma: $peripherals.DMA1_CH1,
        }
    }};
}
