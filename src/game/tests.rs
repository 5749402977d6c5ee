#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::game::questions::{FixedQuestions, QuestionSequence, RandomQuestionBank};
    use crate::game::state::GameState;
    use crate::game::*;

    fn scripted_questions() -> Vec<Question> {
        (1..=10).filter_map(|a| Question::new(a, 1)).collect()
    }

    fn engine() -> Engine {
        Engine::with_seed(
            Box::new(FixedQuestions(scripted_questions())),
            SessionTimings::default(),
            7,
        )
    }

    fn started(mode: GameMode) -> (Engine, Vec<Directive>) {
        let mut engine = engine();
        let directives = engine.start_game(mode).expect("valid questions").into_directives();
        (engine, directives)
    }

    fn current_answer(engine: &Engine) -> u8 {
        engine.session().and_then(|s| s.current_question()).map(|q| q.answer).expect("question")
    }

    fn scheduled(directives: &[Directive], wanted: fn(&Task) -> bool) -> Option<Ticket> {
        directives.iter().find_map(|d| match d {
            Directive::Schedule { ticket, .. } if wanted(&ticket.task) => Some(*ticket),
            _ => None,
        })
    }

    fn advance_ticket(directives: &[Directive]) -> Ticket {
        scheduled(directives, |t| matches!(t, Task::AdvanceRound { .. })).expect("advance scheduled")
    }

    /// Answer correctly from `side`, then let the round-result timer fire.
    fn win_round(engine: &mut Engine, side: Side) -> Transition {
        let answer = current_answer(engine);
        let directives = engine.submit_answer(side, Answer::Value(answer)).into_directives();
        engine.fire(advance_ticket(&directives))
    }

    fn type_answer(engine: &mut Engine, side: Side, value: u8) {
        for digit in value.to_string().bytes().map(|b| b - b'0') {
            let _ = engine.press_digit(side, digit);
        }
    }

    fn rope(engine: &Engine) -> i8 {
        engine.session().map(|s| s.rope_position).unwrap_or(0)
    }

    #[test]
    fn test_start_enters_playing_with_countdown_and_bot() {
        let (engine, directives) = started(GameMode::SinglePlayer);
        assert_eq!(engine.phase(), Phase::Playing);
        assert!(matches!(directives[0], Directive::StartCountdown { .. }));
        let bot = directives.iter().find_map(|d| match d {
            Directive::Schedule { ticket, delay } if ticket.task == Task::BotAnswer => Some(*delay),
            _ => None,
        });
        let delay = bot.expect("bot scheduled").as_millis();
        assert!((3000..7000).contains(&delay));
    }

    #[test]
    fn test_two_player_schedules_no_bot() {
        let (_, directives) = started(GameMode::TwoPlayer);
        assert!(scheduled(&directives, |t| *t == Task::BotAnswer).is_none());
    }

    #[test]
    fn test_malformed_source_refuses_to_start() {
        let mut engine = Engine::new(
            Box::new(FixedQuestions(scripted_questions()[..9].to_vec())),
            SessionTimings::default(),
        );
        assert!(matches!(
            engine.start_game(GameMode::TwoPlayer),
            Err(GameError::WrongQuestionCount { expected: 10, actual: 9 })
        ));
        assert_eq!(engine.phase(), Phase::Menu);
        assert!(engine.session().is_none());
    }

    #[test]
    fn test_typed_correct_answer_pulls_left() {
        let (mut engine, _) = started(GameMode::TwoPlayer);
        let answer = current_answer(&engine);
        type_answer(&mut engine, Side::Left, answer);
        let directives = engine.submit_input(Side::Left).into_directives();

        let session = engine.session().expect("session");
        assert_eq!(session.phase, Phase::RoundResult);
        assert_eq!(session.rope_position, -1);
        assert_eq!(session.round_winner, Some(Side::Left));
        assert_eq!(session.feedback.as_deref(), Some("Left team is correct!"));
        assert_eq!(directives[0], Directive::StopCountdown);
        assert_eq!(directives[1], Directive::CancelPending);
        assert_eq!(advance_ticket(&directives).task, Task::AdvanceRound { rope_at_check: -1 });
    }

    #[test]
    fn test_next_round_resets_buffers_and_advances_once() {
        let (mut engine, _) = started(GameMode::TwoPlayer);
        type_answer(&mut engine, Side::Right, 4);
        let transition = win_round(&mut engine, Side::Left);
        assert!(transition.is_applied());

        let session = engine.session().expect("session");
        assert_eq!(session.phase, Phase::Playing);
        assert_eq!(session.question_index, 1);
        assert!(session.left_input.is_empty() && session.right_input.is_empty());
        assert!(session.round_winner.is_none() && session.feedback.is_none());
    }

    #[test]
    fn test_wrong_answer_clears_only_submitter() {
        let (mut engine, _) = started(GameMode::TwoPlayer);
        let answer = current_answer(&engine);
        type_answer(&mut engine, Side::Left, 9);
        type_answer(&mut engine, Side::Right, answer + 1);

        assert!(engine.submit_input(Side::Right).is_applied());
        let session = engine.session().expect("session");
        assert_eq!(session.right_input, "");
        assert_eq!(session.left_input, "9");
        assert_eq!(session.phase, Phase::Playing);
        assert_eq!(session.rope_position, 0);
    }

    #[test]
    fn test_empty_buffer_submission_is_ignored() {
        let (mut engine, _) = started(GameMode::TwoPlayer);
        assert_eq!(engine.submit_input(Side::Left), Transition::Ignored);
    }

    #[test]
    fn test_input_buffer_holds_two_digits() {
        let (mut engine, _) = started(GameMode::TwoPlayer);
        type_answer(&mut engine, Side::Left, 12);
        assert_eq!(engine.press_digit(Side::Left, 3), Transition::Ignored);
        assert_eq!(engine.press_digit(Side::Left, 10), Transition::Ignored);
        assert_eq!(engine.session().map(|s| s.left_input.as_str()), Some("12"));
        assert!(engine.clear_input(Side::Left).is_applied());
        assert_eq!(engine.clear_input(Side::Left), Transition::Ignored);
    }

    #[test]
    fn test_bot_side_ignores_human_intents() {
        let (mut engine, _) = started(GameMode::SinglePlayer);
        assert_eq!(engine.press_digit(Side::Right, 1), Transition::Ignored);
        assert_eq!(engine.submit_input(Side::Right), Transition::Ignored);
    }

    #[test]
    fn test_keypads_locked_during_round_result() {
        let (mut engine, _) = started(GameMode::TwoPlayer);
        let answer = current_answer(&engine);
        let _ = engine.submit_answer(Side::Left, Answer::Value(answer));
        assert_eq!(engine.press_digit(Side::Right, 1), Transition::Ignored);
        assert_eq!(engine.submit_answer(Side::Right, Answer::Value(answer)), Transition::Ignored);
        assert_eq!(rope(&engine), -1);
    }

    #[test]
    fn test_five_left_wins_end_by_rope() {
        let (mut engine, _) = started(GameMode::TwoPlayer);
        for _ in 0..5 {
            let _ = win_round(&mut engine, Side::Left);
        }
        let snap = engine.snapshot();
        assert_eq!(snap.phase, Phase::GameOver);
        assert_eq!(snap.rope_position, -5);
        assert_eq!(snap.end_reason, Some(EndReason::RopeWin(Side::Left)));
        assert_eq!(snap.result, Some(GameResult::Winner(Side::Left)));
        assert_eq!(snap.question_number, 5);
    }

    #[test]
    fn test_all_questions_even_split_is_a_draw() {
        let (mut engine, _) = started(GameMode::TwoPlayer);
        for round in 0..10 {
            let side = if round % 2 == 0 { Side::Left } else { Side::Right };
            let _ = win_round(&mut engine, side);
        }
        let snap = engine.snapshot();
        assert_eq!(snap.phase, Phase::GameOver);
        assert_eq!(snap.end_reason, Some(EndReason::Finished));
        assert_eq!(snap.result, Some(GameResult::Draw));
        assert_eq!(snap.question_number, 10);
    }

    #[test]
    fn test_timeout_with_right_ahead() {
        let (mut engine, _) = started(GameMode::TwoPlayer);
        let _ = win_round(&mut engine, Side::Right);
        let _ = win_round(&mut engine, Side::Right);
        assert_eq!(rope(&engine), 2);

        let mut last = Transition::Ignored;
        while engine.phase() == Phase::Playing {
            last = engine.tick();
        }
        assert_eq!(last, Transition::Applied(vec![Directive::StopCountdown, Directive::CancelPending]));
        let snap = engine.snapshot();
        assert_eq!(snap.remaining_seconds, 0);
        assert_eq!(snap.end_reason, Some(EndReason::Timeout));
        assert_eq!(snap.result, Some(GameResult::Winner(Side::Right)));
    }

    #[test]
    fn test_countdown_pauses_during_round_result() {
        let (mut engine, _) = started(GameMode::TwoPlayer);
        let _ = engine.tick();
        let answer = current_answer(&engine);
        let _ = engine.submit_answer(Side::Left, Answer::Value(answer));
        assert_eq!(engine.tick(), Transition::Ignored);
        assert_eq!(engine.session().map(|s| s.remaining_seconds), Some(299));
    }

    #[test]
    fn test_rope_limit_beats_last_question() {
        let questions = QuestionSequence::validate(scripted_questions()).expect("valid");
        let mut state = GameState::new(GameMode::TwoPlayer, questions);
        state.question_index = 9;
        assert_eq!(state.arbitrate(-5), Some(EndReason::RopeWin(Side::Left)));
        assert_eq!(state.arbitrate(5), Some(EndReason::RopeWin(Side::Right)));
        assert_eq!(state.arbitrate(4), Some(EndReason::Finished));
        state.question_index = 3;
        assert_eq!(state.arbitrate(4), None);
    }

    #[test]
    fn test_game_over_is_frozen() {
        let (mut engine, _) = started(GameMode::TwoPlayer);
        for _ in 0..5 {
            let _ = win_round(&mut engine, Side::Right);
        }
        let before = engine.snapshot();
        assert_eq!(engine.tick(), Transition::Ignored);
        assert_eq!(engine.submit_answer(Side::Left, Answer::Value(2)), Transition::Ignored);
        assert_eq!(engine.advance_round(0), Transition::Ignored);
        assert_eq!(engine.start_game(GameMode::TwoPlayer), Ok(Transition::Ignored));
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_stale_bot_after_left_wins() {
        let (mut engine, directives) = started(GameMode::SinglePlayer);
        let bot = scheduled(&directives, |t| *t == Task::BotAnswer).expect("bot scheduled");

        let answer = current_answer(&engine);
        let _ = engine.submit_answer(Side::Left, Answer::Value(answer));
        let before = engine.snapshot();

        assert_eq!(engine.fire(bot), Transition::Ignored);
        assert_eq!(engine.snapshot(), before);
        assert_eq!(rope(&engine), -1);
    }

    #[test]
    fn test_bot_answers_correctly_when_it_fires() {
        let (mut engine, directives) = started(GameMode::SinglePlayer);
        let bot = scheduled(&directives, |t| *t == Task::BotAnswer).expect("bot scheduled");
        assert!(engine.fire(bot).is_applied());
        let session = engine.session().expect("session");
        assert_eq!(session.rope_position, 1);
        assert_eq!(session.feedback.as_deref(), Some("Robot is correct!"));
    }

    #[test]
    fn test_return_to_menu_invalidates_pending_advance() {
        let (mut engine, _) = started(GameMode::TwoPlayer);
        let answer = current_answer(&engine);
        let directives = engine.submit_answer(Side::Left, Answer::Value(answer)).into_directives();
        let stale = advance_ticket(&directives);

        assert_eq!(
            engine.return_to_menu(),
            Transition::Applied(vec![Directive::StopCountdown, Directive::CancelPending])
        );
        assert_eq!(engine.phase(), Phase::Menu);
        assert_eq!(engine.return_to_menu(), Transition::Ignored);

        let _ = engine.start_game(GameMode::TwoPlayer).expect("valid questions");
        assert_eq!(engine.fire(stale), Transition::Ignored);
        let session = engine.session().expect("session");
        assert_eq!(session.question_index, 0);
        assert_eq!(session.rope_position, 0);
        assert_eq!(session.phase, Phase::Playing);
    }

    #[test]
    fn test_stale_countdown_after_round_is_dropped() {
        let (mut engine, directives) = started(GameMode::TwoPlayer);
        let Some(Directive::StartCountdown { ticket, .. }) = directives.first().copied() else {
            panic!("countdown not started");
        };
        let _ = win_round(&mut engine, Side::Left);
        assert_eq!(engine.fire(ticket), Transition::Ignored);
        assert_eq!(engine.session().map(|s| s.remaining_seconds), Some(300));
    }

    #[derive(Debug, Clone)]
    enum Event {
        Digit(Side, u8),
        Clear(Side),
        Submit(Side),
        Correct(Side),
        Tick,
        FirePending(usize),
        Menu,
        Start(GameMode),
    }

    fn side() -> impl Strategy<Value = Side> {
        prop_oneof![Just(Side::Left), Just(Side::Right)]
    }

    fn event() -> impl Strategy<Value = Event> {
        prop_oneof![
            (side(), 0u8..10).prop_map(|(s, d)| Event::Digit(s, d)),
            side().prop_map(Event::Clear),
            side().prop_map(Event::Submit),
            side().prop_map(Event::Correct),
            Just(Event::Tick),
            (0usize..8).prop_map(Event::FirePending),
            Just(Event::Menu),
            prop_oneof![Just(GameMode::SinglePlayer), Just(GameMode::TwoPlayer)].prop_map(Event::Start),
        ]
    }

    proptest! {
        #[test]
        fn invariants_hold_under_any_event_order(
            seed in any::<u64>(),
            events in proptest::collection::vec(event(), 1..200),
        ) {
            let mut engine = Engine::with_seed(
                Box::new(RandomQuestionBank::with_seed(seed)),
                SessionTimings::default(),
                seed,
            );
            let mut pending: Vec<Ticket> = Vec::new();

            for event in events {
                let before = engine.session().map(|s| (s.phase, s.rope_position, s.question_index, s.round_winner));
                let transition = match event {
                    Event::Digit(s, d) => engine.press_digit(s, d),
                    Event::Clear(s) => engine.clear_input(s),
                    Event::Submit(s) => engine.submit_input(s),
                    Event::Correct(s) => match engine.session().and_then(|st| st.current_question()) {
                        Some(q) => { let answer = q.answer; engine.submit_answer(s, Answer::Value(answer)) }
                        None => Transition::Ignored,
                    },
                    Event::Tick => engine.tick(),
                    Event::FirePending(i) if !pending.is_empty() => {
                        let ticket = pending.remove(i % pending.len());
                        engine.fire(ticket)
                    }
                    Event::FirePending(_) => Transition::Ignored,
                    Event::Menu => engine.return_to_menu(),
                    Event::Start(mode) => engine.start_game(mode).expect("random bank is valid"),
                };
                for directive in transition.into_directives() {
                    match directive {
                        Directive::StartCountdown { ticket, .. } | Directive::Schedule { ticket, .. } => pending.push(ticket),
                        Directive::StopCountdown | Directive::CancelPending => {}
                    }
                }

                if let Some(s) = engine.session() {
                    prop_assert!((-5..=5).contains(&s.rope_position));
                    prop_assert!(s.question_index < 10);
                    prop_assert!(s.left_input.len() <= 2 && s.right_input.len() <= 2);
                    if let Some((Phase::GameOver, rope, index, winner)) = before {
                        prop_assert_eq!((rope, index, winner), (s.rope_position, s.question_index, s.round_winner));
                    }
                    if let Some((_, rope, _, _)) = before {
                        prop_assert!((s.rope_position - rope).abs() <= 1);
                    }
                }
            }
        }
    }
}
