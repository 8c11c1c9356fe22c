/// Implements [`Event`](crate::event::Event) for a struct.
///
/// The second argument is the `static` [`EventType`](crate::event::EventType)
/// describing the struct.
///
/// # Syntax
///
/// For a plain event:
/// ```rust,ignore
/// impl_event!(PageSavedEvent, PAGE_SAVED);
/// ```
///
/// For an event that extends another event type by embedding it in a field,
/// and/or that can stop propagation through a `bool` field:
/// ```rust,ignore
/// impl_event!(PageSavedEvent, PAGE_SAVED, parent = base, stoppable = stopped);
/// ```
///
/// # Example
///
/// ```
/// use cms_core::event::Event;
/// use cms_core::event::EventType;
/// use cms_core::impl_event;
///
/// static PAGE_EVENT: EventType = EventType::new("page.event");
/// static PAGE_SAVED: EventType = EventType {
///     name: "page.saved",
///     parent: Some(&PAGE_EVENT),
///     capabilities: &[],
/// };
///
/// struct PageEvent {
///     page_id: u32,
/// }
///
/// struct PageSavedEvent {
///     page: PageEvent,
///     stopped: bool,
/// }
///
/// impl_event!(PageEvent, PAGE_EVENT);
/// impl_event!(PageSavedEvent, PAGE_SAVED, parent = page, stoppable = stopped);
///
/// let mut event = PageSavedEvent { page: PageEvent { page_id: 7 }, stopped: false };
/// let event: &mut dyn Event = &mut event;
/// assert_eq!(event.downcast_ref::<PageEvent>().unwrap().page_id, 7);
/// ```
#[macro_export]
macro_rules! impl_event {
    (@stoppable $stopped:ident) => {
        fn as_stoppable(&self) -> Option<&dyn $crate::event::StoppableEvent> {
            Some(self)
        }
    };
    (
        $ty:ty, $event_type:expr
        $(, parent = $parent:ident)?
        $(, stoppable = $stopped:ident)?
        $(,)?
    ) => {
        impl $crate::event::Event for $ty {
            fn event_type(&self) -> &'static $crate::event::EventType {
                &$event_type
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }

            $(
                fn parent_event_mut(&mut self) -> Option<&mut dyn $crate::event::Event> {
                    Some(&mut self.$parent)
                }

                fn parent_event(&self) -> Option<&dyn $crate::event::Event> {
                    Some(&self.$parent)
                }
            )?

            $($crate::impl_event!(@stoppable $stopped);)?
        }

        $(
            impl $crate::event::StoppableEvent for $ty {
                fn is_propagation_stopped(&self) -> bool {
                    self.$stopped
                }
            }
        )?
    };
}
