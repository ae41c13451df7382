#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_halt as _;
use rtic::app;

#[app(device = rp_pico::hal::pac, peripherals = true)]
mod app {
    use core::convert::Infallible;

    use embedded_hal::digital::v2::ToggleableOutputPin;
    use rp_pico::hal::{
        clocks::init_clocks_and_plls,
        gpio::{bank0::Gpio25, DynPinId, FunctionSio, Interrupt, Pin, PullDown, PullUp, SioInput, SioOutput},
        sio::Sio,
        timer::{Alarm as _, Alarm0, Alarm1, Instant, Timer},
        watchdog::Watchdog,
    };
    use rtic::mutex_prelude::*;

    use wokwi_stopwatch::{
        config, tick, Alarm, BcdDigitBus, ControlEvent, DisplayMultiplexer, InputDispatcher,
        ModeIndicator, TickOutcome, TimeState,
    };

    type OutPin = Pin<DynPinId, FunctionSio<SioOutput>, PullDown>;
    type ButtonPin = Pin<DynPinId, FunctionSio<SioInput>, PullUp>;
    type LedPin = Pin<Gpio25, FunctionSio<SioOutput>, PullDown>;

    /// Edge-triggered reset, pause and resume lines. They share the `IO_IRQ_BANK0` vector.
    pub struct ControlLines {
        reset: ButtonPin,
        pause: ButtonPin,
        resume: ButtonPin,
    }

    impl ControlLines {
        fn new(reset: ButtonPin, pause: ButtonPin, resume: ButtonPin) -> Self {
            let mut lines = Self {
                reset,
                pause,
                resume,
            };
            for event in ControlEvent::BY_PRIORITY {
                let line = lines.line(event);
                line.clear_interrupt(Interrupt::EdgeLow);
                line.set_interrupt_enabled(Interrupt::EdgeLow, true);
            }
            lines
        }

        fn line(&mut self, event: ControlEvent) -> &mut ButtonPin {
            match event {
                ControlEvent::Reset => &mut self.reset,
                ControlEvent::Pause => &mut self.pause,
                ControlEvent::Resume => &mut self.resume,
            }
        }

        /// Acknowledges a pending falling edge on `event`'s line.
        fn take_pending(&mut self, event: ControlEvent) -> bool {
            let line = self.line(event);
            let pending = line.interrupt_status(Interrupt::EdgeLow);
            if pending {
                line.clear_interrupt(Interrupt::EdgeLow);
            }
            pending
        }
    }

    fn infallible<T>(result: Result<T, Infallible>) -> T {
        match result {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    // Shared resources (accessed by multiple tasks)
    #[shared]
    struct Shared {
        clock: TimeState,
        alarm: Alarm<OutPin>,
    }

    // Local resources (accessed by single tasks)
    #[local]
    struct Local {
        led: LedPin,
        tick_alarm: Alarm0,
        next_tick: Instant,
        refresh_alarm: Alarm1,
        multiplexer: DisplayMultiplexer,
        digit_bus: BcdDigitBus<OutPin>,
        dispatcher: InputDispatcher<ButtonPin>,
        indicator: ModeIndicator<OutPin>,
        control_lines: ControlLines,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        let mut pac = ctx.device;
        let mut watchdog = Watchdog::new(pac.WATCHDOG);
        let sio = Sio::new(pac.SIO);

        let clocks = defmt::unwrap!(init_clocks_and_plls(
            config::XTAL_FREQ_HZ,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        )
        .ok());

        let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);

        // 1 Hz tick, scheduled against absolute deadlines so it does not drift
        let mut tick_alarm = defmt::unwrap!(timer.alarm_0());
        let next_tick = timer.get_counter() + config::TICK_PERIOD;
        defmt::unwrap!(tick_alarm.schedule_at(next_tick).ok());
        tick_alarm.enable_interrupt();

        let mut refresh_alarm = defmt::unwrap!(timer.alarm_1());
        defmt::unwrap!(refresh_alarm.schedule(config::REFRESH_SLOT_PERIOD).ok());
        refresh_alarm.enable_interrupt();

        let pins = rp_pico::Pins::new(
            pac.IO_BANK0,
            pac.PADS_BANK0,
            sio.gpio_bank0,
            &mut pac.RESETS,
        );

        let led = pins.led.into_push_pull_output();

        // GPIO0..5: digit enables (H-tens first), GPIO6..9: BCD value, LSB first
        let digit_bus = infallible(BcdDigitBus::new(
            [
                pins.gpio0.into_push_pull_output().into_dyn_pin(),
                pins.gpio1.into_push_pull_output().into_dyn_pin(),
                pins.gpio2.into_push_pull_output().into_dyn_pin(),
                pins.gpio3.into_push_pull_output().into_dyn_pin(),
                pins.gpio4.into_push_pull_output().into_dyn_pin(),
                pins.gpio5.into_push_pull_output().into_dyn_pin(),
            ],
            [
                pins.gpio6.into_push_pull_output().into_dyn_pin(),
                pins.gpio7.into_push_pull_output().into_dyn_pin(),
                pins.gpio8.into_push_pull_output().into_dyn_pin(),
                pins.gpio9.into_push_pull_output().into_dyn_pin(),
            ],
        ));

        // GPIO10: buzzer, GPIO11/12: count-up / countdown LEDs
        let alarm = infallible(Alarm::new(pins.gpio10.into_push_pull_output().into_dyn_pin()));
        let indicator = ModeIndicator::new(
            pins.gpio11.into_push_pull_output().into_dyn_pin(),
            pins.gpio12.into_push_pull_output().into_dyn_pin(),
        );

        // GPIO13..19: mode, hour+, hour-, minute+, minute-, second+, second- (active low)
        let dispatcher = InputDispatcher::new([
            pins.gpio13.into_pull_up_input().into_dyn_pin(),
            pins.gpio14.into_pull_up_input().into_dyn_pin(),
            pins.gpio15.into_pull_up_input().into_dyn_pin(),
            pins.gpio16.into_pull_up_input().into_dyn_pin(),
            pins.gpio17.into_pull_up_input().into_dyn_pin(),
            pins.gpio18.into_pull_up_input().into_dyn_pin(),
            pins.gpio19.into_pull_up_input().into_dyn_pin(),
        ]);

        // GPIO20..22: reset, pause, resume (falling edge)
        let control_lines = ControlLines::new(
            pins.gpio20.into_pull_up_input().into_dyn_pin(),
            pins.gpio21.into_pull_up_input().into_dyn_pin(),
            pins.gpio22.into_pull_up_input().into_dyn_pin(),
        );

        let clock = config::INITIAL_STATE;
        defmt::info!(
            "stopwatch up: {}, slot rate {=u32} Hz, frame rate {=u32} Hz",
            clock,
            config::REFRESH_SLOT_RATE_HZ,
            config::FRAME_RATE_HZ
        );

        (
            Shared { clock, alarm },
            Local {
                led,
                tick_alarm,
                next_tick,
                refresh_alarm,
                multiplexer: DisplayMultiplexer::new(),
                digit_bus,
                dispatcher,
                indicator,
                control_lines,
            },
            init::Monotonics(),
        )
    }

    // Hardware Task: reset / pause / resume edges
    #[task(binds = IO_IRQ_BANK0, priority = 4, shared = [clock, alarm], local = [control_lines])]
    fn control_event(ctx: control_event::Context) {
        let lines = ctx.local.control_lines;
        (ctx.shared.clock, ctx.shared.alarm).lock(|clock, alarm| {
            for event in ControlEvent::BY_PRIORITY {
                if lines.take_pending(event) {
                    infallible(event.apply(clock, alarm));
                    defmt::info!("{}: {}", event, clock);
                }
            }
        });
    }

    // Hardware Task: Timer Interrupt (1Hz)
    #[task(binds = TIMER_IRQ_0, priority = 3, shared = [clock, alarm], local = [tick_alarm, next_tick, led])]
    fn second_elapsed(ctx: second_elapsed::Context) {
        let tick_alarm = ctx.local.tick_alarm;
        tick_alarm.clear_interrupt();
        *ctx.local.next_tick = *ctx.local.next_tick + config::TICK_PERIOD;
        if tick_alarm.schedule_at(*ctx.local.next_tick).is_err() {
            defmt::warn!("second tick deadline already passed");
        }

        infallible(ctx.local.led.toggle());

        let (outcome, snapshot) = (ctx.shared.clock, ctx.shared.alarm).lock(|clock, alarm| {
            (infallible(tick::on_second_elapsed(clock, alarm)), *clock)
        });

        match outcome {
            TickOutcome::ZeroReached => defmt::warn!("countdown reached zero, alarm on"),
            TickOutcome::Wrapped => defmt::info!("wrapped past midnight"),
            TickOutcome::Advanced | TickOutcome::Paused => {}
        }

        let mut buf = [0u8; 8];
        if let Ok(hms) = snapshot.format_hms(&mut buf) {
            defmt::debug!("{=str} {}", hms, outcome);
        }
    }

    // Hardware Task: display multiplexing, one digit slot per interrupt
    #[task(binds = TIMER_IRQ_1, priority = 2, shared = [clock], local = [refresh_alarm, multiplexer, digit_bus])]
    fn refresh_slot(mut ctx: refresh_slot::Context) {
        ctx.local.refresh_alarm.clear_interrupt();
        if ctx.local.refresh_alarm.schedule(config::REFRESH_SLOT_PERIOD).is_err() {
            defmt::warn!("refresh slot reschedule failed");
        }

        // Copy under the lock; drive the pins outside it
        let snapshot = ctx.shared.clock.lock(|clock| *clock);
        infallible(ctx.local.multiplexer.on_refresh_slot(&snapshot, ctx.local.digit_bus));
    }

    // Control loop: buttons and mode indicators
    #[idle(shared = [clock], local = [dispatcher, indicator])]
    fn idle(mut ctx: idle::Context) -> ! {
        loop {
            let actions = infallible(ctx.local.dispatcher.poll());
            let mode = ctx.shared.clock.lock(|clock| {
                for action in &actions {
                    action.apply(clock);
                }
                clock.mode()
            });
            for action in &actions {
                defmt::info!("button: {}", action);
            }
            infallible(ctx.local.indicator.reflect(mode));
        }
    }
}
