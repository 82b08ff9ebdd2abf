// demos/climb.rs

use total_energy_autopilot::{
    Input, RegimeConfig, RegimeStateMachine, TotalEnergyConfig, TotalEnergyController,
};

fn main() {
    let mut config = TotalEnergyConfig::<f32>::new();

    // Tick at 50 Hz.
    config.frequency = 50.0;

    // Keep the default gains, but allow a slightly steeper take-off.
    config.cmd_takeoff_pitch = 8.0;

    let controller = match TotalEnergyController::with_config(config) {
        Ok(controller) => controller,
        Err(err) => {
            eprintln!("invalid configuration: {}", err);
            return;
        }
    };
    let mut autopilot = RegimeStateMachine::with_config(controller, RegimeConfig::new());

    // Commanded airspeed and altitude.
    let (va_c, h_c) = (18.0, 40.0);

    // Point-mass aircraft on the runway.
    let mut va: f32 = 12.0;
    let mut h: f32 = 0.0;
    let mut theta: f32 = 0.0;
    let dt = config.period();

    println!("     t,   regime,       Va,        h,    theta,  delta_t,  delta_e");
    let mut t = 0.0;
    for step in 0..=3000 {
        let q = 0.0;
        let output = autopilot.control(&Input::new(va_c, va, h_c, h, theta, q));

        if step % 100 == 0 {
            println!(
                "{:6.1}, {:>8}, {:-8.3}, {:-8.3}, {:-8.3}, {:-8.3}, {:-8.3}",
                t,
                format!("{:?}", output.regime),
                va,
                h,
                theta,
                output.delta_t,
                output.delta_e
            );
        }

        // Simulate response: pitch lags the target, throttle accelerates
        // against drag, climbing trades airspeed for height.
        theta += (output.theta_c - theta) * 2.0 * dt;
        let climb_rate = va * theta.sin();
        let thrust = 6.0 * output.delta_t;
        let drag = 0.02 * va * va;
        va += (thrust - drag) * dt - 9.8 * theta.sin() * dt;
        h = (h + climb_rate * dt).max(0.0);

        t += dt;
    }
}
