//! Compile-time binding of the rental platform contract interface.
//!
//! The structs mirror the contract's storage structs field-for-field; the
//! interface lists every method the gateway calls or prepares calldata for.

use alloy_sol_types::sol;

sol! {
    struct User {
        string name;
        string email;
        bool isVerified;
        uint256 reputation;
        uint256 joinDate;
    }

    struct Property {
        address owner;
        string title;
        string description;
        uint256 price;
        bool isAvailable;
        uint256[] bookingIds;
        uint256 reputation;
    }

    struct Booking {
        address tenant;
        uint256 propertyId;
        uint256 startDate;
        uint256 endDate;
        uint256 totalPrice;
        bool isConfirmed;
        bool isCompleted;
    }

    struct Review {
        address reviewer;
        uint256 propertyId;
        uint256 rating;
        string comment;
        uint256 timestamp;
    }

    interface RentalPlatform {
        function registerUser(string _name, string _email) external;
        function registerProperty(string _title, string _description, uint256 _price) external;
        function createBooking(uint256 _propertyId, uint256 _startDate, uint256 _endDate) external;
        function confirmBooking(uint256 _bookingId) external;
        function completeBooking(uint256 _bookingId) external;
        function submitReview(uint256 _propertyId, uint256 _rating, string _comment) external;

        function getUserInfo(address _user) external view returns (User memory);
        function getPropertyInfo(uint256 _propertyId) external view returns (Property memory);
        function getBookingInfo(uint256 _bookingId) external view returns (Booking memory);
        function getPropertyReviews(uint256 _propertyId) external view returns (Review[] memory);
        function propertyCount() external view returns (uint256);
    }
}
