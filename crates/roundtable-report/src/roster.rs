// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Event attendees.
//!
//! A roster keeps attendees in registration order together with their display
//! name and whether they checked in. `checked_in_ids` is the participant list
//! handed to the engine.

use crate::error::ReportError;
use roundtable_model::model::ParticipantId;
use rustc_hash::FxHashMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attendee<P> {
    pub id: P,
    pub name: String,
    pub checked_in: bool,
}

#[derive(Debug, Clone)]
pub struct Roster<P>
where
    P: ParticipantId,
{
    attendees: Vec<Attendee<P>>,
    lookup: FxHashMap<P, usize>,
}

impl<P> Default for Roster<P>
where
    P: ParticipantId,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Roster<P>
where
    P: ParticipantId,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            attendees: Vec::new(),
            lookup: FxHashMap::default(),
        }
    }

    /// Registers an attendee who has not checked in yet.
    pub fn register<N>(&mut self, id: P, name: N) -> Result<(), ReportError>
    where
        N: Into<String>,
    {
        if self.lookup.contains_key(&id) {
            return Err(ReportError::DuplicateAttendee {
                id: format!("{:?}", id),
            });
        }

        self.lookup.insert(id.clone(), self.attendees.len());
        self.attendees.push(Attendee {
            id,
            name: name.into(),
            checked_in: false,
        });
        Ok(())
    }

    pub fn check_in(&mut self, id: &P) -> Result<(), ReportError> {
        self.set_checked_in(id, true)
    }

    pub fn check_out(&mut self, id: &P) -> Result<(), ReportError> {
        self.set_checked_in(id, false)
    }

    fn set_checked_in(&mut self, id: &P, checked_in: bool) -> Result<(), ReportError> {
        let position = self
            .lookup
            .get(id)
            .copied()
            .ok_or_else(|| ReportError::UnknownAttendee {
                id: format!("{:?}", id),
            })?;
        self.attendees[position].checked_in = checked_in;
        Ok(())
    }

    /// Returns the ids of checked-in attendees in registration order.
    pub fn checked_in_ids(&self) -> Vec<P> {
        self.attendees
            .iter()
            .filter(|a| a.checked_in)
            .map(|a| a.id.clone())
            .collect()
    }

    #[inline]
    pub fn get(&self, id: &P) -> Option<&Attendee<P>> {
        self.lookup.get(id).map(|&i| &self.attendees[i])
    }

    #[inline]
    pub fn name_of(&self, id: &P) -> Option<&str> {
        self.get(id).map(|a| a.name.as_str())
    }

    #[inline]
    pub fn is_checked_in(&self, id: &P) -> bool {
        self.get(id).is_some_and(|a| a.checked_in)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.attendees.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attendees.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Attendee<P>> {
        self.attendees.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster<u32> {
        let mut roster = Roster::new();
        roster.register(1, "Ada").unwrap();
        roster.register(2, "Grace").unwrap();
        roster.register(3, "Linus").unwrap();
        roster
    }

    #[test]
    fn test_only_checked_in_attendees_are_listed() {
        let mut roster = roster();
        roster.check_in(&3).unwrap();
        roster.check_in(&1).unwrap();

        assert_eq!(roster.checked_in_ids(), vec![1, 3]);
        assert!(roster.is_checked_in(&1));
        assert!(!roster.is_checked_in(&2));
    }

    #[test]
    fn test_check_out_removes_from_allocation() {
        let mut roster = roster();
        roster.check_in(&2).unwrap();
        roster.check_out(&2).unwrap();
        assert!(roster.checked_in_ids().is_empty());
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut roster = roster();
        assert_eq!(
            roster.register(2, "Someone"),
            Err(ReportError::DuplicateAttendee { id: "2".to_string() })
        );
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn test_unknown_attendee_fails() {
        let mut roster = roster();
        assert_eq!(
            roster.check_in(&9),
            Err(ReportError::UnknownAttendee { id: "9".to_string() })
        );
    }

    #[test]
    fn test_name_lookup() {
        let roster = roster();
        assert_eq!(roster.name_of(&2), Some("Grace"));
        assert_eq!(roster.name_of(&4), None);
    }
}
