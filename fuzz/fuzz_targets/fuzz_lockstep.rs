#![no_main]

use libfuzzer_sys::fuzz_target;

use gridrace_core::lineup::Lineup;
use gridrace_core::options::RaceOptions;
use gridrace_core::participant::ParticipantId;
use gridrace_orchestration::lockstep::LockstepRace;
use gridrace_orchestration::worker::WorkerExit;

fuzz_target!(|data: &[u8]| {
    if data.len() < 9 {
        return;
    }
    let seed = u64::from_le_bytes(data[..8].try_into().unwrap());
    // Deltas from 0.01 to 1.0 keep a run short.
    let delta = f64::from(data[8] % 100 + 1) / 100.0;
    let orders = &data[9..];

    let opts = RaceOptions {
        delta,
        snap_on_saturation: seed % 2 == 0,
        ..RaceOptions::default()
    };
    let mut race = LockstepRace::new(&Lineup::assign(Some(seed)), &opts).unwrap();
    race.start();

    // Each byte picks which lanes tick this round and in what order.
    let mut round = 0;
    while !race.coordinator().is_finished() {
        let mask = orders.get(round % orders.len().max(1)).copied().unwrap_or(0xff);
        let rotate = u32::from(mask >> 4) % 4;
        let order: Vec<ParticipantId> = (0..4)
            .map(|i| (i + rotate) % 4)
            .filter(|i| mask & (1 << i) != 0 || mask & 0x0f == 0)
            .map(ParticipantId)
            .collect();
        race.step(&order);
        round += 1;
        assert!(round <= 10_000, "no winner after {round} rounds");
    }

    let summary = race.run_to_finish(&[]).unwrap();
    let winners = summary
        .entrants
        .iter()
        .filter(|e| e.exit == WorkerExit::Won)
        .count();
    assert_eq!(winners, 1);
    assert!(summary.entrants.iter().all(|e| e.progress <= 1.0));
});
