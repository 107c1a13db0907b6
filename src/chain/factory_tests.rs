#[cfg(test)]
mod tests {
    use crate::chain::factory::TodoListFactory;
    use crate::domain::account::Address;
    use crate::domain::error::ContractError;

    fn factory() -> TodoListFactory {
        TodoListFactory::new(Address::random())
    }

    #[test]
    fn starts_empty() {
        let factory = factory();
        assert_eq!(factory.user_count(), 0);
        assert!(factory.users(0, 10).is_empty());
        assert_eq!(factory.todo_list_for(Address::random()), None);
    }

    #[test]
    fn register_records_mapping_and_enumeration() {
        let mut factory = factory();
        let user = Address::random();
        let list = Address::random();
        factory.register(user, list).unwrap();

        assert_eq!(factory.todo_list_for(user), Some(list));
        assert_eq!(factory.user_count(), 1);
        assert_eq!(factory.users(0, 10), &[user]);
    }

    #[test]
    fn register_rejects_duplicates() {
        let mut factory = factory();
        let user = Address::random();
        factory.register(user, Address::random()).unwrap();
        assert_eq!(
            factory.register(user, Address::random()).unwrap_err(),
            ContractError::ListAlreadyExists
        );
        assert_eq!(factory.user_count(), 1);
    }

    #[test]
    fn enumeration_preserves_registration_order() {
        let mut factory = factory();
        let users: Vec<Address> = (0..3).map(|_| Address::random()).collect();
        for &user in &users {
            factory.register(user, Address::random()).unwrap();
        }
        assert_eq!(factory.users(0, 10), users.as_slice());
    }

    #[test]
    fn pagination_never_fails() {
        let mut factory = factory();
        let users: Vec<Address> = (0..3).map(|_| Address::random()).collect();
        for &user in &users {
            factory.register(user, Address::random()).unwrap();
        }

        assert_eq!(factory.users(0, 2), &users[..2]);
        assert_eq!(factory.users(2, 2), &users[2..]);
        assert_eq!(factory.users(1, 10), &users[1..]);
        assert!(factory.users(10, 5).is_empty());
        assert!(factory.users(0, 0).is_empty());
        assert_eq!(factory.users(0, u64::MAX), users.as_slice());
    }

    #[test]
    fn ownership_transfer_checks_caller_and_zero_address() {
        let owner = Address::random();
        let mut factory = TodoListFactory::new(owner);
        let next = Address::random();

        assert_eq!(
            factory.transfer_ownership(Address::random(), next).unwrap_err(),
            ContractError::NotOwner
        );
        assert_eq!(
            factory.transfer_ownership(owner, Address::zero()).unwrap_err(),
            ContractError::ZeroAddressOwner
        );
        assert_eq!(factory.transfer_ownership(owner, next).unwrap(), owner);
        assert_eq!(factory.owner(), next);
    }
}
