#[cfg(test)]
mod tests {
    use crate::chain::todo_list::TodoList;
    use crate::domain::account::Address;
    use crate::domain::error::ContractError;
    use crate::domain::todo::{CreateTodo, Priority, TodoPatch, TodoStats, MAX_TODOS_PER_USER};

    fn create(title: &str, description: &str, priority: Priority) -> CreateTodo {
        CreateTodo { title: title.into(), description: description.into(), priority }
    }

    fn list_with_owner() -> (TodoList, Address) {
        let owner = Address::random();
        (TodoList::new(owner), owner)
    }

    #[test]
    fn create_then_get_returns_stored_fields() {
        let (mut list, owner) = list_with_owner();
        let created = list.create_todo(owner, create("Test Todo", "Test Description", Priority::Medium)).unwrap();
        assert_eq!(created.id, 1);

        let got = list.todo(owner, 1).unwrap();
        assert_eq!(got.title, "Test Todo");
        assert_eq!(got.description, "Test Description");
        assert_eq!(got.priority, Priority::Medium);
        assert!(!got.completed);
        assert_eq!(got.completed_at, None);
        assert_eq!(got.created_at, got.updated_at);
    }

    #[test]
    fn create_validates_title_and_description() {
        let (mut list, owner) = list_with_owner();
        assert_eq!(
            list.create_todo(owner, create("", "d", Priority::Low)).unwrap_err(),
            ContractError::EmptyTitle
        );
        assert_eq!(
            list.create_todo(owner, create(&"a".repeat(101), "d", Priority::Low)).unwrap_err(),
            ContractError::TitleTooLong
        );
        assert_eq!(
            list.create_todo(owner, create("t", &"a".repeat(501), Priority::Low)).unwrap_err(),
            ContractError::DescriptionTooLong
        );
        // nothing was stored by the failed calls
        assert!(list.todos(owner).is_empty());
    }

    #[test]
    fn create_accepts_exact_bounds_and_empty_description() {
        let (mut list, owner) = list_with_owner();
        let max_title = "a".repeat(100);
        let max_description = "b".repeat(500);
        list.create_todo(owner, create(&max_title, &max_description, Priority::High)).unwrap();
        list.create_todo(owner, create("no description", "", Priority::Low)).unwrap();

        assert_eq!(list.todo(owner, 1).unwrap().title, max_title);
        assert_eq!(list.todo(owner, 2).unwrap().description, "");
    }

    #[test]
    fn ids_increment_and_are_never_reused() {
        let (mut list, owner) = list_with_owner();
        for i in 1..=3 {
            let todo = list.create_todo(owner, create(&format!("Todo {i}"), "", Priority::Low)).unwrap();
            assert_eq!(todo.id, i);
        }
        list.delete_todo(owner, 3).unwrap();
        let next = list.create_todo(owner, create("after delete", "", Priority::Low)).unwrap();
        assert_eq!(next.id, 4);
    }

    #[test]
    fn create_fails_when_book_is_full() {
        let (mut list, owner) = list_with_owner();
        for i in 0..MAX_TODOS_PER_USER {
            list.create_todo(owner, create(&format!("Todo {i}"), "", Priority::Medium)).unwrap();
        }
        assert_eq!(
            list.create_todo(owner, create("overflow", "", Priority::Medium)).unwrap_err(),
            ContractError::TodoListFull
        );
        // the bound is on active records: deleting frees a slot
        list.delete_todo(owner, 1).unwrap();
        list.create_todo(owner, create("fits again", "", Priority::Medium)).unwrap();
    }

    #[test]
    fn callers_only_see_their_own_records() {
        let (mut list, owner) = list_with_owner();
        let other = Address::random();
        list.create_todo(owner, create("Owner Todo", "", Priority::Medium)).unwrap();
        let theirs = list.create_todo(other, create("Other Todo", "", Priority::Medium)).unwrap();

        // ids are sequenced per caller
        assert_eq!(theirs.id, 1);
        assert_eq!(list.todos(owner).len(), 1);
        assert_eq!(list.todos(other).len(), 1);
        assert_eq!(list.todo(other, 1).unwrap().title, "Other Todo");

        // cross-caller access is structurally a miss
        assert_eq!(list.update_todo(other, 1, TodoPatch::default()).unwrap().title, "Other Todo");
        assert_eq!(list.delete_todo(Address::random(), 1).unwrap_err(), ContractError::TodoNotFound);
    }

    #[test]
    fn todos_is_empty_for_unknown_caller() {
        let (list, _) = list_with_owner();
        assert!(list.todos(Address::random()).is_empty());
    }

    #[test]
    fn patch_applies_only_provided_fields() {
        let (mut list, owner) = list_with_owner();
        list.create_todo(owner, create("Original Title", "Original Description", Priority::Medium)).unwrap();

        let patched = list
            .update_todo(owner, 1, TodoPatch { priority: Some(Priority::High), ..Default::default() })
            .unwrap();
        assert_eq!(patched.title, "Original Title");
        assert_eq!(patched.description, "Original Description");
        assert_eq!(patched.priority, Priority::High);

        let patched = list
            .update_todo(owner, 1, TodoPatch { title: Some("Updated Title".into()), ..Default::default() })
            .unwrap();
        assert_eq!(patched.title, "Updated Title");
        assert_eq!(patched.description, "Original Description");
    }

    #[test]
    fn patch_can_clear_description_but_not_title() {
        let (mut list, owner) = list_with_owner();
        list.create_todo(owner, create("Title", "Description", Priority::Low)).unwrap();

        let err = list
            .update_todo(owner, 1, TodoPatch { title: Some(String::new()), ..Default::default() })
            .unwrap_err();
        assert_eq!(err, ContractError::EmptyTitle);
        assert_eq!(list.todo(owner, 1).unwrap().title, "Title");

        let patched = list
            .update_todo(owner, 1, TodoPatch { description: Some(String::new()), ..Default::default() })
            .unwrap();
        assert_eq!(patched.description, "");
    }

    #[test]
    fn failed_patch_leaves_record_untouched() {
        let (mut list, owner) = list_with_owner();
        list.create_todo(owner, create("Title", "Description", Priority::Low)).unwrap();
        let before = list.todo(owner, 1).unwrap().clone();

        let err = list
            .update_todo(
                owner,
                1,
                TodoPatch {
                    title: Some("New Title".into()),
                    description: Some("a".repeat(501)),
                    priority: Some(Priority::High),
                },
            )
            .unwrap_err();
        assert_eq!(err, ContractError::DescriptionTooLong);
        assert_eq!(list.todo(owner, 1).unwrap(), &before);
    }

    #[test]
    fn patch_refreshes_updated_at_only() {
        let (mut list, owner) = list_with_owner();
        let created = list.create_todo(owner, create("Title", "", Priority::Low)).unwrap();
        let patched = list
            .update_todo(owner, 1, TodoPatch { title: Some("Changed".into()), ..Default::default() })
            .unwrap();
        assert_eq!(patched.created_at, created.created_at);
        assert!(patched.updated_at >= created.updated_at);
    }

    #[test]
    fn update_missing_id_is_not_found() {
        let (mut list, owner) = list_with_owner();
        assert_eq!(
            list.update_todo(owner, 999, TodoPatch::default()).unwrap_err(),
            ContractError::TodoNotFound
        );
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let (mut list, owner) = list_with_owner();
        list.create_todo(owner, create("Test Todo", "", Priority::Medium)).unwrap();

        let done = list.toggle_todo_completion(owner, 1).unwrap();
        assert!(done.completed);
        assert!(done.completed_at.is_some());

        let undone = list.toggle_todo_completion(owner, 1).unwrap();
        assert!(!undone.completed);
        assert_eq!(undone.completed_at, None);
    }

    #[test]
    fn toggle_missing_id_is_not_found() {
        let (mut list, owner) = list_with_owner();
        assert_eq!(list.toggle_todo_completion(owner, 1).unwrap_err(), ContractError::TodoNotFound);
    }

    #[test]
    fn delete_preserves_surviving_records() {
        let (mut list, owner) = list_with_owner();
        for i in 1..=3 {
            list.create_todo(owner, create(&format!("Todo {i}"), &format!("Description {i}"), Priority::Low)).unwrap();
        }
        list.delete_todo(owner, 2).unwrap();

        assert_eq!(list.todo(owner, 2).unwrap_err(), ContractError::TodoNotFound);
        assert_eq!(list.todos(owner).len(), 2);
        assert_eq!(list.todo(owner, 1).unwrap().title, "Todo 1");
        assert_eq!(list.todo(owner, 3).unwrap().description, "Description 3");

        assert_eq!(list.delete_todo(owner, 999).unwrap_err(), ContractError::TodoNotFound);
    }

    #[test]
    fn stats_on_empty_book_are_all_zero() {
        let (list, owner) = list_with_owner();
        assert_eq!(list.stats(owner), TodoStats::default());
    }

    #[test]
    fn stats_count_only_uncompleted_high_priority() {
        let (mut list, owner) = list_with_owner();
        list.create_todo(owner, create("High 1", "", Priority::High)).unwrap();
        list.create_todo(owner, create("Medium", "", Priority::Medium)).unwrap();
        list.create_todo(owner, create("Low", "", Priority::Low)).unwrap();
        list.create_todo(owner, create("High 2", "", Priority::High)).unwrap();
        list.toggle_todo_completion(owner, 1).unwrap();
        list.toggle_todo_completion(owner, 3).unwrap();

        let stats = list.stats(owner);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.high_priority, 1);
    }

    #[test]
    fn stats_follow_deletions() {
        let (mut list, owner) = list_with_owner();
        list.create_todo(owner, create("Todo 1", "", Priority::Low)).unwrap();
        list.create_todo(owner, create("Todo 2", "", Priority::Low)).unwrap();
        list.toggle_todo_completion(owner, 2).unwrap();
        list.delete_todo(owner, 2).unwrap();

        let stats = list.stats(owner);
        assert_eq!(stats.total, 1);
        assert_eq!(stats.completed, 0);
    }

    #[test]
    fn ownership_transfer_checks_caller_and_zero_address() {
        let (mut list, owner) = list_with_owner();
        let stranger = Address::random();
        let next = Address::random();

        assert_eq!(list.transfer_ownership(stranger, next).unwrap_err(), ContractError::NotOwner);
        assert_eq!(list.transfer_ownership(owner, Address::zero()).unwrap_err(), ContractError::ZeroAddressOwner);

        let previous = list.transfer_ownership(owner, next).unwrap();
        assert_eq!(previous, owner);
        assert_eq!(list.owner(), next);
    }

    #[test]
    fn old_owner_keeps_their_records_after_transfer() {
        let (mut list, owner) = list_with_owner();
        list.create_todo(owner, create("Owner Todo", "", Priority::Medium)).unwrap();
        list.transfer_ownership(owner, Address::random()).unwrap();
        assert_eq!(list.todo(owner, 1).unwrap().title, "Owner Todo");
    }
}
