use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;

/// String identifier tagged with the kind of entity it names.
///
/// The derived `Ord` compares the inner string, which gives every id kind a
/// stable total order independent of any value attached to the entity.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Serialize)]
pub struct Id<T> {
    pub id: String,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(id: impl Into<String>) -> Self {
        Id { id: id.into(), _marker: PhantomData }
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<T> From<Id<T>> for String {
    fn from(id_wrapper: Id<T>) -> Self {
        id_wrapper.id
    }
}

impl<T> From<&str> for Id<T> {
    fn from(id: &str) -> Self {
        Id::new(id)
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let full_name = std::any::type_name::<T>();
        let clean_name = full_name.split("::").last().unwrap_or(full_name);
        let display_name = clean_name.replace("Tag", "Id");

        write!(f, "{}: {:?}", display_name, self.id)
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct TaskGroupTag;
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct ServiceInstanceTag;

pub type TaskGroupId = Id<TaskGroupTag>;
pub type ServiceInstanceId = Id<ServiceInstanceTag>;

impl ServiceInstanceId {
    /// Fresh random id, used to tell restarted coordinator instances apart in the logs.
    pub fn random() -> Self {
        Id::new(uuid::Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_uses_tag_name() {
        let id = TaskGroupId::new("map");
        assert_eq!(format!("{:?}", id), "TaskGroupId: \"map\"");
        assert_eq!(id.to_string(), "map");
    }

    #[test]
    fn test_ordering_follows_inner_string() {
        let a = TaskGroupId::new("a");
        let b = TaskGroupId::new("b");
        assert!(a < b);
        assert_eq!(a, TaskGroupId::from("a"));
    }

    #[test]
    fn test_random_instance_ids_differ() {
        assert_ne!(ServiceInstanceId::random(), ServiceInstanceId::random());
    }
}
