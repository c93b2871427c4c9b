use std::time::Duration;

use chromaquest_core::*;

fn new_session(best: Score) -> Session<RandomRoundGenerator, MemoryScoreStore> {
    Session::new(
        SessionConfig::default(),
        RandomRoundGenerator::from_seed(2024),
        MemoryScoreStore::with_best(best),
    )
}

fn hit<G: RoundGenerator, S: ScoreStore>(session: &mut Session<G, S>, now: Instant) {
    let index = session.round().expect("round in play").target_index();
    assert_eq!(session.pick(index, now), Ok(PickOutcome::Hit));
}

#[test]
fn timeout_without_picks_ends_with_zero() {
    let t0 = Instant::now();
    let mut store = MemoryScoreStore::default();

    {
        let mut session = Session::new(
            SessionConfig::default(),
            RandomRoundGenerator::from_seed(2024),
            &mut store,
        );
        session.start(t0).unwrap();

        let mut outcome = TickOutcome::NoChange;
        for second in 1..=30 {
            outcome = session.tick(t0 + Duration::from_secs(second));
        }

        assert_eq!(
            outcome,
            TickOutcome::TimeUp(SessionSummary {
                score: 0,
                best: 0,
                new_best: false,
                rank: Rank::Cadet,
            })
        );
        assert_eq!(session.state(), SessionState::Ended);
        assert_eq!(session.seconds_left(), 0);
        assert_eq!(session.best(), 0);
    }
    assert_eq!(store.writes(), 0);
    assert_eq!(store.load_best(), 0);
}

#[test]
fn timeout_with_new_best_writes_once() {
    let t0 = Instant::now();
    let mut store = MemoryScoreStore::with_best(1);

    {
        let mut session = Session::new(
            SessionConfig::default(),
            RandomRoundGenerator::from_seed(77),
            &mut store,
        );
        session.start(t0).unwrap();
        for _ in 0..3 {
            hit(&mut session, t0 + Duration::from_secs(2));
        }

        let outcome = session.tick(t0 + Duration::from_secs(30));
        assert_eq!(
            outcome,
            TickOutcome::TimeUp(SessionSummary {
                score: 3,
                best: 3,
                new_best: true,
                rank: Rank::Cadet,
            })
        );
        // a second expiry tick must not store again
        assert_eq!(session.tick(t0 + Duration::from_secs(31)), TickOutcome::NoChange);
    }
    assert_eq!(store.writes(), 1);
    assert_eq!(store.load_best(), 3);
}

#[test]
fn correct_pick_scores_and_deals_a_new_round() {
    let t0 = Instant::now();
    let mut session = new_session(0);
    session.start(t0).unwrap();
    assert_eq!(session.level(), 1);

    hit(&mut session, t0 + Duration::from_millis(800));

    assert_eq!(session.score(), 1);
    assert_eq!(session.level(), 2);
    let round = session.round().unwrap();
    assert_eq!(round.size(), 2);
    assert_eq!(round.delta_l(), DifficultyCurve::default().delta_at(2));
}

#[test]
fn grid_grows_as_score_climbs() {
    let t0 = Instant::now();
    let mut session = new_session(0);
    session.start(t0).unwrap();

    let mut sizes = vec![session.round().unwrap().size()];
    for _ in 0..40 {
        hit(&mut session, t0);
        sizes.push(session.round().unwrap().size());
    }

    assert!(sizes.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(sizes.first(), Some(&2));
    assert_eq!(sizes.last(), Some(&8));
    assert_eq!(session.rank(), Rank::Elite);
}

#[test]
fn reset_after_end_returns_to_idle() {
    let t0 = Instant::now();
    let mut session = new_session(0);
    session.start(t0).unwrap();
    hit(&mut session, t0);
    session.tick(t0 + Duration::from_secs(31));
    assert_eq!(session.state(), SessionState::Ended);

    session.reset();

    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.score(), 0);
    assert_eq!(session.seconds_left(), 30);
    assert!(session.round().is_none());
    assert_eq!(session.best(), 1);
}

#[test]
fn best_is_persisted_only_when_beaten() {
    let t0 = Instant::now();
    let mut store = MemoryScoreStore::with_best(2);

    {
        let mut session = Session::new(
            SessionConfig::default(),
            RandomRoundGenerator::from_seed(1),
            &mut store,
        );
        session.start(t0).unwrap();
        hit(&mut session, t0);
        session.end().unwrap();
    }
    assert_eq!(store.writes(), 0);

    {
        let mut session = Session::new(
            SessionConfig::default(),
            RandomRoundGenerator::from_seed(1),
            &mut store,
        );
        session.start(t0).unwrap();
        for _ in 0..5 {
            hit(&mut session, t0);
        }
        let summary = session.end().unwrap();
        assert!(summary.new_best);
    }
    assert_eq!(store.writes(), 1);
    assert_eq!(store.load_best(), 5);
}

#[test]
fn shorter_sessions_respect_configured_duration() {
    let t0 = Instant::now();
    let mut session = Session::new(
        SessionConfig::default().with_duration(5),
        RandomRoundGenerator::from_seed(9),
        MemoryScoreStore::default(),
    );
    session.start(t0).unwrap();
    assert_eq!(session.seconds_left(), 5);

    assert!(matches!(
        session.tick(t0 + Duration::from_secs(5)),
        TickOutcome::TimeUp(_)
    ));
}
