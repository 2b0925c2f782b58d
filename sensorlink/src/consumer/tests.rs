use super::*;
use crate::link::{local, Sender as _};
use std::time::Duration;
use tokio::time::timeout;

fn sensor_message(kind: SensorKind, value: f32, timestamp: u32) -> Message {
    Message::new(kind.method(), wire::encode(&Reading::new(value, timestamp)).to_vec())
}

#[test]
fn messages_route_to_their_own_kind() {
    let mut consumer = Consumer::new();

    let speed = consumer
        .handle(&sensor_message(SensorKind::Speed, 85.5, 1))
        .expect("speed should dispatch");
    let engine = consumer
        .handle(&sensor_message(SensorKind::EngineTemperature, 104.0, 2))
        .expect("engine temperature should dispatch");
    let ambient = consumer
        .handle(&sensor_message(SensorKind::AmbientTemperature, -5.0, 3))
        .expect("ambient temperature should dispatch");

    assert_eq!(speed.kind, SensorKind::Speed);
    assert_eq!(speed.reading, Reading::new(85.5, 1));
    assert_eq!(speed.condition, Condition::Nominal);

    assert_eq!(engine.kind, SensorKind::EngineTemperature);
    assert_eq!(engine.reading, Reading::new(104.0, 2));
    assert_eq!(engine.condition, Condition::Overheat);

    assert_eq!(ambient.kind, SensorKind::AmbientTemperature);
    assert_eq!(ambient.reading, Reading::new(-5.0, 3));
    assert_eq!(ambient.condition, Condition::Freezing);

    // Each dispatch is independent; only the sequence number advances.
    assert_eq!(
        (speed.sequence, engine.sequence, ambient.sequence),
        (1, 2, 3)
    );
    assert_eq!(consumer.received(), 3);
}

#[test]
fn speeding_reading_is_flagged() {
    let mut consumer = Consumer::new();
    let observation = consumer
        .handle(&sensor_message(SensorKind::Speed, 120.0, 98765))
        .expect("should dispatch");
    assert_eq!(observation.reading, Reading::new(120.0, 98765));
    assert_eq!(observation.condition, Condition::HighSpeed);
}

#[test]
fn unknown_method_ids_are_rejected() {
    let mut consumer = Consumer::new();
    let message = Message::new(0x00ff, vec![0u8; 8]);
    let result = consumer.handle(&message);
    assert!(matches!(result, Err(Error::UnknownMethod(0x00ff))));
    assert_eq!(consumer.received(), 0);
}

#[test]
fn short_payloads_dispatch_as_zeroed_readings() {
    let mut consumer = Consumer::new();
    let message = Message::new(SensorKind::Speed.method(), vec![0xff; 7]);
    let observation = consumer.handle(&message).expect("should dispatch");
    assert_eq!(observation.reading, Reading::new(0.0, 0));
    assert_eq!(observation.condition, Condition::Nominal);
}

#[test]
fn observations_display_like_the_console_log() {
    let mut consumer = Consumer::new();
    let nominal = consumer
        .handle(&sensor_message(SensorKind::Speed, 85.5, 1))
        .expect("should dispatch");
    assert_eq!(format!("{nominal}"), "[#   1] speed: 85.5 km/h");

    let alert = consumer
        .handle(&sensor_message(SensorKind::Speed, 120.0, 2))
        .expect("should dispatch");
    assert_eq!(format!("{alert}"), "[#   2] speed: 120.0 km/h (high speed)");
}

#[tokio::test]
async fn run_drains_the_link_until_it_closes() {
    let (mut sender, receiver) = local::pair(8);
    receiver.offer();

    let mut consumer = Consumer::new();
    let token = CancellationToken::new();

    for (kind, value) in [
        (SensorKind::Speed, 50.0),
        (SensorKind::EngineTemperature, 90.0),
        (SensorKind::AmbientTemperature, 20.0),
    ] {
        sender
            .send(sensor_message(kind, value, 0))
            .await
            .expect("should send the message");
    }
    drop(sender);

    timeout(Duration::from_secs(1), consumer.run(receiver, token))
        .await
        .expect("run should return once the link closes");
    assert_eq!(consumer.received(), 3);
}
