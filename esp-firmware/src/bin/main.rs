// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Embassy Async Runtime
use defmt::info;
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{DriveMode, Input, InputConfig, Pull};
use esp_hal::ledc::channel::{self as ledc_channel, ChannelIFace as _};
use esp_hal::ledc::timer::{self as ledc_timer, TimerIFace as _};
use esp_hal::ledc::{LSGlobalClkSource, Ledc, LowSpeed};
use esp_hal::time::Rate;
use esp_hal::timer::timg::TimerGroup;
use esp_hal::uart::{Config as UartConfig, DataBits, Parity, StopBits, Uart};
use static_cell::StaticCell;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use esp_dimmer_lora::EventQueue;
use esp_dimmer_lora::config::{
    HANDSHAKE_BUTTON_GPIO_PIN, LED_GPIO_PINS, LORA_BAUD_RATE, LORA_UART_RX_GPIO_PIN,
    LORA_UART_TX_GPIO_PIN, PWM_DUTY_BITS, PWM_FREQUENCY_HZ,
};
use esp_dimmer_lora::hal::{DimmerButtons, LedcPwmOutput, UartTransport};
use esp_dimmer_lora::tasks::{button_edge_task, dimmer_task, handshake_task};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

// LEDC Timer und Kanäle müssen 'static sein (Kanäle halten den Timer per Referenz)
static PWM_TIMER: StaticCell<ledc_timer::Timer<'static, LowSpeed>> = StaticCell::new();
static LED_CHANNELS: StaticCell<[ledc_channel::Channel<'static, LowSpeed>; 3]> =
    StaticCell::new();

// Event-Queue zwischen Taster-Task (Producer) und Handshake-Task (Consumer)
static EVENT_QUEUE: StaticCell<EventQueue> = StaticCell::new();

/// Main Entry Point
///
/// Initialisiert Hardware, startet Embassy Runtime und spawnt Tasks.
/// Danach schläft main() - alle Arbeit läuft in Tasks.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // ------------------------------------------------------------------------
    // LEDC: ein Timer, drei Kanäle mit identischem Duty
    // ------------------------------------------------------------------------
    let mut ledc = Ledc::new(peripherals.LEDC);
    ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);

    let mut pwm_timer = ledc.timer::<LowSpeed>(ledc_timer::Number::Timer0);
    pwm_timer
        .configure(ledc_timer::config::Config {
            duty: ledc_timer::config::Duty::Duty10Bit,
            clock_source: ledc_timer::LSClockSource::APBClk,
            frequency: Rate::from_hz(PWM_FREQUENCY_HZ),
        })
        .expect("LEDC timer");
    let pwm_timer: &'static ledc_timer::Timer<'static, LowSpeed> = PWM_TIMER.init(pwm_timer);

    let channel_config = || ledc_channel::config::Config {
        timer: pwm_timer,
        duty_pct: 0,
        drive_mode: DriveMode::PushPull,
    };
    let mut led1 = ledc.channel::<LowSpeed>(ledc_channel::Number::Channel0, peripherals.GPIO21);
    led1.configure(channel_config()).expect("LEDC channel 0");
    let mut led2 = ledc.channel::<LowSpeed>(ledc_channel::Number::Channel1, peripherals.GPIO22);
    led2.configure(channel_config()).expect("LEDC channel 1");
    let mut led3 = ledc.channel::<LowSpeed>(ledc_channel::Number::Channel2, peripherals.GPIO23);
    led3.configure(channel_config()).expect("LEDC channel 2");

    let [led1, led2, led3] = LED_CHANNELS.init([led1, led2, led3]);
    let pwm = LedcPwmOutput::new([&*led1, &*led2, &*led3]);
    info!(
        "LEDC: {} Hz, {} bit on GPIO{}/{}/{}",
        PWM_FREQUENCY_HZ, PWM_DUTY_BITS, LED_GPIO_PINS[0], LED_GPIO_PINS[1], LED_GPIO_PINS[2]
    );

    // ------------------------------------------------------------------------
    // Taster: active-low mit internem Pull-Up
    // ------------------------------------------------------------------------
    let button_config = InputConfig::default().with_pull(Pull::Up);
    let dimmer_buttons = DimmerButtons::new(
        Input::new(peripherals.GPIO6, button_config),
        Input::new(peripherals.GPIO7, button_config),
        Input::new(peripherals.GPIO10, button_config),
    );
    let handshake_button = Input::new(peripherals.GPIO9, button_config);

    // ------------------------------------------------------------------------
    // UART1 zum LoRa-Modul (8N1)
    // ------------------------------------------------------------------------
    let uart_config = UartConfig::default()
        .with_baudrate(LORA_BAUD_RATE)
        .with_data_bits(DataBits::_8)
        .with_parity(Parity::None)
        .with_stop_bits(StopBits::_1);
    let uart = Uart::new(peripherals.UART1, uart_config)
        .expect("UART1 init")
        .with_tx(peripherals.GPIO4)
        .with_rx(peripherals.GPIO5)
        .into_async();
    info!(
        "UART1: {} baud, TX=GPIO{} RX=GPIO{}, handshake button GPIO{}",
        LORA_BAUD_RATE, LORA_UART_TX_GPIO_PIN, LORA_UART_RX_GPIO_PIN, HANDSHAKE_BUTTON_GPIO_PIN
    );

    // Event-Queue aufteilen: Producer → Taster-Task, Consumer → Handshake-Task
    let (event_producer, event_consumer) = EVENT_QUEUE.init(EventQueue::new()).split();

    // Spawn Tasks
    spawner.spawn(dimmer_task(dimmer_buttons, pwm)).unwrap();
    spawner
        .spawn(button_edge_task(handshake_button, event_producer))
        .unwrap();
    spawner
        .spawn(handshake_task(UartTransport::new(uart), event_consumer))
        .unwrap();

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
