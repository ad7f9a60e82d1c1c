// ABI surface of the diamond, its facets and the token standard it talks to.
// Function selectors and error/event encodings derive from these canonical signatures.
#![allow(clippy::too_many_arguments)]

use alloy_sol_types::sol;

sol! {
    #[derive(Debug, PartialEq, Eq)]
    interface IDiamondCut {
        // `action` carries the FacetCutAction enum (Add = 0, Replace = 1, Remove = 2)
        struct FacetCut {
            address facetAddress;
            uint8 action;
            bytes4[] functionSelectors;
        }

        event DiamondCut(FacetCut[] cuts, address init, bytes initCalldata);

        function diamondCut(FacetCut[] cuts, address init, bytes initCalldata) external;
    }
}

sol! {
    #[derive(Debug, PartialEq, Eq)]
    interface IDiamondLoupe {
        struct Facet {
            address facetAddress;
            bytes4[] functionSelectors;
        }

        function facets() external view returns (Facet[] facets_);
        function facetFunctionSelectors(address facet) external view returns (bytes4[] facetFunctionSelectors_);
        function facetAddresses() external view returns (address[] facetAddresses_);
        function facetAddress(bytes4 functionSelector) external view returns (address facetAddress_);
    }
}

sol! {
    #[derive(Debug, PartialEq, Eq)]
    interface IERC165 {
        function supportsInterface(bytes4 interfaceId) external view returns (bool);
    }
}

sol! {
    #[derive(Debug, PartialEq, Eq)]
    interface IERC173 {
        event OwnershipTransferred(address indexed previousOwner, address indexed newOwner);

        function owner() external view returns (address owner_);
        function transferOwnership(address newOwner) external;
    }
}

sol! {
    #[derive(Debug, PartialEq, Eq)]
    interface LibDiamond {
        error NotContractOwner(address user, address contractOwner);
        error NoFacetCutsProvided();
        error NoSelectorsProvidedForFacetForCut(address facetAddress);
        error CannotAddSelectorsToZeroAddress(bytes4[] selectors);
        error NoBytecodeAtAddress(address contractAddress, string message);
        error IncorrectFacetCutAction(uint8 action);
        error CannotAddFunctionToDiamondThatAlreadyExists(bytes4 selector);
        error CannotReplaceFunctionsFromFacetWithZeroAddress(bytes4[] selectors);
        error CannotReplaceImmutableFunction(bytes4 selector);
        error CannotReplaceFunctionWithTheSameFunctionFromTheSameFacet(bytes4 selector);
        error CannotReplaceFunctionThatDoesNotExists(bytes4 selector);
        error RemoveFacetAddressMustBeZeroAddress(address facetAddress);
        error CannotRemoveFunctionThatDoesNotExist(bytes4 selector);
        error CannotRemoveImmutableFunction(bytes4 selector);
        error InitializationFunctionReverted(address initializationContractAddress, bytes initCalldata);
        error FunctionNotFound(bytes4 functionSelector);
    }
}

sol! {
    #[derive(Debug, PartialEq, Eq)]
    interface IDiamondInit {
        function init(address feeRecipient) external;
    }
}

sol! {
    #[derive(Debug, PartialEq, Eq)]
    interface IFeeCollector {
        event FeeRecipientUpdated(address indexed previousRecipient, address indexed newRecipient);

        error FeeRecipientZeroAddress();
        error FeeRecipientIsDiamond();
        error FeeRecipientSameAsCurrent();

        function setFeeRecipient(address recipient) external;
        function getFeeRecipient() external view returns (address);
    }
}

sol! {
    #[derive(Debug, PartialEq, Eq)]
    interface IReentrancyGuard {
        error ReentrancyGuardReentrantCall();
    }
}

sol! {
    #[derive(Debug, PartialEq, Eq)]
    interface IAggregatorProxy {
        event FeeCollected(address indexed token, address indexed recipient, uint256 amount);
        event TokensTransferred(address indexed token, address indexed to, uint256 amount);

        error InvalidFeePercentage(uint256 fee);
        error MalformedTokenWithFee(uint256 tokenWithFee);
        error InvalidAggregatorAddress(address aggregator);
        error InvalidNativeAmount(uint256 expected, uint256 actual);
        error FeeRecipientNotSet();
        error TokenCallFailed(address token);
        error NativeTransferFailed(address to, uint256 amount);
        error AmountOverflow();
    }
}

sol! {
    #[derive(Debug, PartialEq, Eq)]
    interface IOneInchFacet {
        function callOneInch(uint256 fromTokenWithFee, uint256 fromAmount, uint256 toTokenWithFee, bytes callData) external payable;
    }
}

sol! {
    #[derive(Debug, PartialEq, Eq)]
    interface ILiFiFacet {
        function callLiFi(uint256 fromTokenWithFee, uint256 fromAmount, uint256 toTokenWithFee, bytes callData) external payable;
    }
}

sol! {
    #[derive(Debug, PartialEq, Eq)]
    interface IERC20 {
        event Transfer(address indexed from, address indexed to, uint256 value);
        event Approval(address indexed owner, address indexed spender, uint256 value);

        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function transfer(address to, uint256 amount) external returns (bool);
        function transferFrom(address from, address to, uint256 amount) external returns (bool);
        function approve(address spender, uint256 amount) external returns (bool);
    }
}
