//! Integration tests for events

#[cfg(test)]
mod tests {
    use cbuild_events::*;
    use cbuild_types::Step;
    use std::time::Duration;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_event_emitter_on_sender() {
        let (tx, mut rx) = channel();

        tx.emit_warning_with_context("configure step failed", "exit code 1");
        tx.emit_invocation_finished(Uuid::nil(), 1);

        match rx.recv().await.unwrap() {
            AppEvent::General(GeneralEvent::Warning { message, context }) => {
                assert_eq!(message, "configure step failed");
                assert_eq!(context.as_deref(), Some("exit code 1"));
            }
            other => panic!("unexpected event: {other:?}"),
        }

        assert!(matches!(
            rx.recv().await.unwrap(),
            AppEvent::Invocation(InvocationEvent::Finished { exit_code: 1, .. })
        ));
    }

    #[tokio::test]
    async fn test_dropped_receiver() {
        let (tx, rx) = channel();
        drop(rx);

        // Should not panic when receiver is dropped
        tx.emit_warning_with_context("ignored", "no receiver");
    }

    #[test]
    fn test_none_sender_is_silent() {
        let sender: Option<EventSender> = None;
        assert!(sender.event_sender().is_none());
        sender.emit_warning_with_context("nobody listens", "none");
    }

    #[tokio::test]
    async fn test_step_events_in_order() {
        let (tx, mut rx) = channel();
        let id = Uuid::new_v4();

        tx.emit_step_started(id, Step::Configure, "cmake -S ./src -B out");
        tx.emit_step_completed(id, Step::Configure, Some(0), true, Duration::from_millis(5));
        tx.emit_invocation_finished(id, 0);

        match rx.recv().await.unwrap() {
            AppEvent::Invocation(InvocationEvent::StepStarted { step, command, .. }) => {
                assert_eq!(step, Step::Configure);
                assert!(command.starts_with("cmake"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(matches!(
            rx.recv().await.unwrap(),
            AppEvent::Invocation(InvocationEvent::StepCompleted { success: true, .. })
        ));
        assert!(matches!(
            rx.recv().await.unwrap(),
            AppEvent::Invocation(InvocationEvent::Finished { exit_code: 0, .. })
        ));
    }

    #[test]
    fn test_app_event_serialization_is_tagged() {
        let event = AppEvent::Invocation(InvocationEvent::StepSkipped {
            invocation_id: Uuid::nil(),
            step: Step::Build,
            reason: "configure failed".into(),
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["domain"], "invocation");
        assert_eq!(json["event"]["type"], "step_skipped");
        assert_eq!(json["event"]["step"], "build");
    }
}
